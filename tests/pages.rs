//! Page state tests
//!
//! Drives the home and detail pages against a scripted source, the same way
//! the terminal front-end does: take a ticket, run the load, resolve.

use std::sync::Arc;
use std::time::Duration;

use kisetsu::Error;
use kisetsu::prelude::*;

mod common;
use common::{MockSource, TEST_ANIME_ID, TEST_SEASON, TEST_YEAR, anime, sample_episodes};

async fn load_home(page: &mut HomePage, source: &MockSource, ticket: Ticket) -> bool {
    let result = ticket
        .run(load_season(source, page.key()))
        .await
        .expect("ticket cancelled");
    page.resolve(&ticket, result)
}

async fn load_page(page: &mut DetailPage, source: &MockSource, id: u32, ticket: Ticket) -> bool {
    let result = ticket
        .run(load_detail(source, id))
        .await
        .expect("ticket cancelled");
    page.resolve(&ticket, result)
}

#[cfg(test)]
mod home_tests {
    use super::*;

    #[tokio::test]
    async fn test_home_starts_loading() {
        let mut page = HomePage::new(TEST_YEAR, TEST_SEASON);
        assert_eq!(page.view(), ListView::Loading);
        assert_eq!(page.title(), "Summer 2025 Anime");

        let ticket = page.enter().expect("first visit should fetch");
        assert!(page.phase().is_loading());
        assert_eq!(page.view(), ListView::Loading);
        assert_eq!(page.count_label(), None);
        drop(ticket);
    }

    #[tokio::test]
    async fn test_home_search_counts_matches() {
        let source = MockSource::new();
        let mut page = HomePage::new(TEST_YEAR, TEST_SEASON);

        let ticket = page.enter().unwrap();
        assert!(load_home(&mut page, &source, ticket).await);
        assert_eq!(page.count_label().as_deref(), Some("5 Series"));

        page.set_search("kaiju");
        assert_eq!(page.count_label().as_deref(), Some("2 Series"));
        match page.view() {
            ListView::Grid(items) => {
                let ids: Vec<u32> = items.iter().map(|a| a.id).collect();
                assert_eq!(ids, vec![2, 4]);
            }
            other => panic!("expected grid, got {:?}", other),
        }

        page.clear_search();
        assert_eq!(page.visible().len(), 5);
    }

    #[tokio::test]
    async fn test_home_empty_listing_and_no_results_differ() {
        let source = MockSource::new().with_season(Ok(vec![]));
        let mut page = HomePage::new(TEST_YEAR, TEST_SEASON);

        let ticket = page.enter().unwrap();
        load_home(&mut page, &source, ticket).await;
        assert_eq!(page.view(), ListView::EmptyListing);

        // Searching an empty listing is still "No anime found"
        page.set_search("anything");
        assert_eq!(page.view(), ListView::EmptyListing);

        source.set_season(Ok(vec![anime(7, "Dandadan", None)]));
        let ticket = page.reload().unwrap();
        load_home(&mut page, &source, ticket).await;
        assert_eq!(page.view(), ListView::NoResults { term: "anything" });
        assert_eq!(page.count_label().as_deref(), Some("0 Series"));
    }

    #[tokio::test]
    async fn test_home_does_not_refetch_same_season() {
        let source = MockSource::new();
        let mut page = HomePage::new(TEST_YEAR, TEST_SEASON);

        let ticket = page.enter().unwrap();
        load_home(&mut page, &source, ticket).await;

        assert!(page.enter().is_none());
        assert_eq!(MockSource::calls(&source.season_calls), 1);
        assert!(page.phase().is_ready());
    }

    #[tokio::test]
    async fn test_home_error_then_reload() {
        let source = MockSource::new().with_season(Err(Error::http(500, "https://api.jikan.moe/v4/seasons/2025/summer")));
        let mut page = HomePage::new(TEST_YEAR, TEST_SEASON);

        let ticket = page.enter().unwrap();
        load_home(&mut page, &source, ticket).await;
        match page.view() {
            ListView::Error(message) => assert!(message.contains("500")),
            other => panic!("expected error, got {:?}", other),
        }

        source.set_season(Ok(common::sample_listing()));
        let ticket = page.reload().unwrap();
        assert_eq!(page.view(), ListView::Loading);
        load_home(&mut page, &source, ticket).await;
        assert!(page.phase().is_ready());
        assert_eq!(MockSource::calls(&source.season_calls), 2);
    }

    #[tokio::test]
    async fn test_home_season_switch_discards_stale_result() {
        let source = MockSource::new();
        let mut page = HomePage::new(TEST_YEAR, TEST_SEASON);

        let summer = page.enter().unwrap();
        let fall = page.next_season().unwrap();
        assert_eq!(page.key(), (2025, Season::Fall));
        assert_eq!(page.title(), "Fall 2025 Anime");

        // The summer cycle was superseded and cancelled
        assert!(summer.is_cancelled());
        assert!(!page.resolve(&summer, Ok(vec![anime(99, "Stale", None)])));
        assert!(page.phase().is_loading());

        assert!(load_home(&mut page, &source, fall).await);
        assert_eq!(page.visible().len(), 5);
    }

    #[tokio::test]
    async fn test_home_cursor_follows_filter() {
        let source = MockSource::new();
        let mut page = HomePage::new(TEST_YEAR, TEST_SEASON);
        let ticket = page.enter().unwrap();
        load_home(&mut page, &source, ticket).await;

        page.move_down();
        page.move_down();
        page.move_down();
        page.move_down();
        page.move_down();
        assert_eq!(page.cursor(), 4);
        assert_eq!(page.selected().map(|a| a.id), Some(5));

        page.set_search("kaiju");
        assert_eq!(page.cursor(), 1);
        assert_eq!(page.selected().map(|a| a.id), Some(4));

        page.move_up();
        page.move_up();
        assert_eq!(page.selected().map(|a| a.id), Some(2));
    }
}

#[cfg(test)]
mod detail_tests {
    use super::*;

    #[tokio::test]
    async fn test_detail_join_success() {
        let source = MockSource::new();
        let mut page = DetailPage::new();

        let ticket = page.open(TEST_ANIME_ID).unwrap();
        assert_eq!(page.view(), DetailView::Loading);
        assert!(load_page(&mut page, &source, TEST_ANIME_ID, ticket).await);

        match page.view() {
            DetailView::Ready { anime, episodes } => {
                assert_eq!(anime.summary.id, TEST_ANIME_ID);
                assert_eq!(episodes.len(), 3);
            }
            other => panic!("expected ready, got {:?}", other),
        }
        assert_eq!(MockSource::calls(&source.anime_calls), 1);
        assert_eq!(MockSource::calls(&source.episode_calls), 1);
    }

    #[tokio::test]
    async fn test_detail_episode_failure_is_error() {
        let source = MockSource::new().with_episodes(Err(Error::http(
            500,
            "https://api.jikan.moe/v4/anime/52991/episodes",
        )));
        let mut page = DetailPage::new();

        let ticket = page.open(TEST_ANIME_ID).unwrap();
        load_page(&mut page, &source, TEST_ANIME_ID, ticket).await;

        assert!(matches!(page.view(), DetailView::Error(_)));
        assert!(page.phase().data().is_none());
    }

    #[tokio::test]
    async fn test_detail_join_fails_without_waiting_for_slow_side() {
        let source = MockSource::new()
            .with_anime_delay(Duration::from_secs(5))
            .with_episodes(Err(Error::http(500, "https://api.jikan.moe/v4/anime/52991/episodes")));
        let mut page = DetailPage::new();
        let ticket = page.open(TEST_ANIME_ID).unwrap();

        let result = tokio::time::timeout(
            Duration::from_millis(100),
            load_detail(&source, TEST_ANIME_ID),
        )
        .await
        .expect("join should end on the first failure");
        assert!(result.is_err());

        assert!(page.resolve(&ticket, result));
        match page.view() {
            DetailView::Error(message) => assert!(message.contains("500")),
            other => panic!("expected error, got {:?}", other),
        }
        assert_eq!(MockSource::calls(&source.anime_calls), 1);
    }

    #[tokio::test]
    async fn test_detail_anime_failure_is_error() {
        let source = MockSource::new().with_anime(Err(Error::not_found("anime 52991")));
        let mut page = DetailPage::new();

        let ticket = page.open(TEST_ANIME_ID).unwrap();
        load_page(&mut page, &source, TEST_ANIME_ID, ticket).await;

        match page.view() {
            DetailView::Error(message) => assert!(message.contains("anime 52991")),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_detail_unknown_id_shows_error() {
        let source = MockSource::new()
            .with_anime(Err(Error::http(404, "https://api.jikan.moe/v4/anime/999")))
            .with_episodes(Err(Error::http(404, "https://api.jikan.moe/v4/anime/999/episodes")));
        let mut page = DetailPage::new();

        let ticket = page.open(999).unwrap();
        load_page(&mut page, &source, 999, ticket).await;

        match page.view() {
            DetailView::Error(message) => assert!(message.contains("404")),
            other => panic!("expected error, got {:?}", other),
        }
        assert!(page.selected_episode().is_none());
    }

    #[tokio::test]
    async fn test_detail_episode_modal() {
        let source = MockSource::new();
        let mut page = DetailPage::new();
        let ticket = page.open(TEST_ANIME_ID).unwrap();
        load_page(&mut page, &source, TEST_ANIME_ID, ticket).await;

        assert!(page.selected_episode().is_none());

        assert!(page.select_episode(2));
        assert_eq!(page.selected_episode().map(|e| e.number), Some(2));

        page.close_episode();
        assert!(page.selected_episode().is_none());

        // Numbers outside the listing are ignored
        assert!(!page.select_episode(42));
        assert!(page.selected_episode().is_none());

        page.move_down();
        page.move_down();
        page.move_down();
        assert_eq!(page.cursor(), 2);
        assert!(page.select_current());
        assert_eq!(
            page.selected_episode().map(|e| e.title.as_str()),
            Some(sample_episodes()[2].title.as_str())
        );
        assert_eq!(
            page.selected_episode().and_then(|e| e.aired.as_deref()),
            sample_episodes()[2].aired.as_deref()
        );
        assert!(page.selected_episode().and_then(|e| e.aired.as_deref()).is_some());
    }

    #[tokio::test]
    async fn test_detail_empty_episodes_is_ready() {
        let source = MockSource::new().with_episodes(Ok(vec![]));
        let mut page = DetailPage::new();
        let ticket = page.open(TEST_ANIME_ID).unwrap();
        load_page(&mut page, &source, TEST_ANIME_ID, ticket).await;

        match page.view() {
            DetailView::Ready { episodes, .. } => assert!(episodes.is_empty()),
            other => panic!("expected ready, got {:?}", other),
        }
        assert!(!page.select_current());
    }

    #[tokio::test]
    async fn test_detail_leave_cancels_inflight_fetch() {
        let source = Arc::new(MockSource::new().with_delay(Duration::from_secs(5)));
        let mut page = DetailPage::new();
        let ticket = page.open(TEST_ANIME_ID).unwrap();

        let task = {
            let source = Arc::clone(&source);
            let ticket = ticket.clone();
            tokio::spawn(async move { ticket.run(load_detail(source.as_ref(), TEST_ANIME_ID)).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        page.leave();

        let outcome = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("cancelled fetch should finish promptly")
            .unwrap();
        assert!(outcome.is_none());
        assert!(page.phase().is_idle());

        // A late result for the old cycle is rejected
        assert!(!page.resolve(&ticket, Ok(DetailData {
            anime: common::detail(TEST_ANIME_ID),
            episodes: vec![],
        })));
        assert!(page.phase().is_idle());
    }

    #[tokio::test]
    async fn test_detail_reopen_after_leave_refetches() {
        let source = MockSource::new();
        let mut page = DetailPage::new();

        let ticket = page.open(TEST_ANIME_ID).unwrap();
        load_page(&mut page, &source, TEST_ANIME_ID, ticket).await;
        page.select_episode(1);

        // Same id while ready does not refetch
        assert!(page.open(TEST_ANIME_ID).is_none());

        page.leave();
        assert!(page.selected_episode().is_none());

        let ticket = page.open(TEST_ANIME_ID).expect("re-entry should refetch");
        load_page(&mut page, &source, TEST_ANIME_ID, ticket).await;
        assert!(page.phase().is_ready());
        assert_eq!(MockSource::calls(&source.anime_calls), 2);
    }

    #[tokio::test]
    async fn test_detail_switch_id_discards_previous() {
        let source = MockSource::new();
        let mut page = DetailPage::new();

        let first = page.open(1).unwrap();
        let second = page.open(2).unwrap();
        assert_eq!(page.anime_id(), Some(2));

        let stale = first.run(load_detail(&source, 1)).await;
        assert!(stale.is_none(), "superseded ticket should be cancelled");

        assert!(load_page(&mut page, &source, 2, second).await);
        assert!(page.phase().is_ready());
    }
}
