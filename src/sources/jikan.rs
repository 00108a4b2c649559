use crate::{
    error::Result,
    net::{HttpClient, json},
    source::Source,
    types::{AiringStatus, AnimeDetail, AnimeSummary, Episode, Season},
};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, info};

/// Default Jikan v4 root.
pub const JIKAN_BASE_URL: &str = "https://api.jikan.moe/v4";

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Jikan anime record, shared by the seasonal and detail endpoints
#[derive(Debug, Deserialize)]
struct JikanAnime {
    mal_id: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    title_english: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    images: JikanImages,
    synopsis: Option<String>,
    status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    aired: JikanAired,
    #[serde(default, deserialize_with = "null_as_default")]
    genres: Vec<JikanNamed>,
    score: Option<f64>,
    episodes: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    studios: Vec<JikanNamed>,
    rating: Option<String>,
    duration: Option<String>,
    popularity: Option<u32>,
    rank: Option<u32>,
    source: Option<String>,
    scored_by: Option<u32>,
}

/// Jikan image set, keyed by format
#[derive(Debug, Default, Deserialize)]
struct JikanImages {
    #[serde(default, deserialize_with = "null_as_default")]
    jpg: JikanImage,
}

#[derive(Debug, Default, Deserialize)]
struct JikanImage {
    image_url: Option<String>,
}

/// Jikan aired range, only the display string is used
#[derive(Debug, Default, Deserialize)]
struct JikanAired {
    string: Option<String>,
}

/// Genre or studio entry
#[derive(Debug, Deserialize)]
struct JikanNamed {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
}

/// Jikan episode record
#[derive(Debug, Deserialize)]
struct JikanEpisode {
    mal_id: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    title_japanese: Option<String>,
    title_romanji: Option<String>,
    aired: Option<String>,
    score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    filler: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    recap: bool,
}

/// Jikan source implementation for the public MyAnimeList mirror at jikan.moe.
///
/// Every operation issues a single GET against the v4 API:
///
/// - `GET {base}/seasons/{year}/{season}?sfw`
/// - `GET {base}/anime/{id}`
/// - `GET {base}/anime/{id}/episodes`
///
/// Only the first page of paginated responses is read. Jikan throttles at
/// roughly three requests per second and answers 429 beyond that, which
/// surfaces as [`Error::RateLimit`](crate::Error::RateLimit).
///
/// # Examples
///
/// ```rust,no_run
/// use kisetsu::sources::JikanSource;
/// use kisetsu::prelude::*;
///
/// # async fn example() -> kisetsu::Result<()> {
/// let source = JikanSource::new();
/// let detail = source.fetch_anime(52991).await?;
/// println!("{}", detail.summary.display_title());
/// # Ok(())
/// # }
/// ```
pub struct JikanSource {
    client: HttpClient,
    api_base: String,
    sfw: bool,
}

impl JikanSource {
    /// Create a new Jikan source against the public API
    pub fn new() -> Self {
        Self::with_base_url(JIKAN_BASE_URL)
    }

    /// Create a Jikan source against a different API root (mirrors, local proxies)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new("jikan").with_header("Accept", "application/json"),
            api_base: base_url.into().trim_end_matches('/').to_string(),
            sfw: true,
        }
    }

    /// Toggle the `sfw` filter on seasonal listings (on by default)
    pub fn with_sfw(mut self, sfw: bool) -> Self {
        self.sfw = sfw;
        self
    }

    /// Override the `User-Agent` header
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.client = self.client.with_header("User-Agent", user_agent);
        self
    }

    /// Seasonal listing URL for the given year and season
    pub fn season_url(&self, year: i32, season: Season) -> String {
        let mut url = format!("{}/seasons/{}/{}", self.api_base, year, season.as_str());
        if self.sfw {
            url.push_str("?sfw");
        }
        url
    }

    /// Detail URL for one anime
    pub fn anime_url(&self, id: u32) -> String {
        format!("{}/anime/{}", self.api_base, id)
    }

    /// Episode listing URL for one anime
    pub fn episodes_url(&self, id: u32) -> String {
        format!("{}/anime/{}/episodes", self.api_base, id)
    }

    async fn get_envelope(&self, url: &str) -> Result<Value> {
        let body: Value = self.client.get_json(url).await?;
        if json::has_next_page(&body) {
            debug!(url = %url, "further pages available, only the first is read");
        }
        Ok(body)
    }
}

impl Default for JikanSource {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn named(entries: &[JikanNamed]) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| !entry.name.trim().is_empty())
        .map(|entry| entry.name.clone())
        .collect()
}

fn map_summary(anime: &JikanAnime) -> AnimeSummary {
    AnimeSummary {
        id: anime.mal_id,
        title: anime.title.clone(),
        title_english: non_empty(anime.title_english.clone()),
        image_url: anime.images.jpg.image_url.clone().unwrap_or_default(),
        synopsis: non_empty(anime.synopsis.clone()),
        status: anime
            .status
            .as_deref()
            .map(AiringStatus::from)
            .unwrap_or_else(|| AiringStatus::Other(String::new())),
        aired: anime.aired.string.clone().unwrap_or_default(),
        genres: named(&anime.genres),
        score: anime.score,
    }
}

fn map_detail(anime: JikanAnime) -> AnimeDetail {
    let summary = map_summary(&anime);
    AnimeDetail {
        summary,
        episode_count: anime.episodes,
        studios: named(&anime.studios),
        rating: non_empty(anime.rating),
        duration: non_empty(anime.duration),
        popularity: anime.popularity,
        rank: anime.rank,
        source: non_empty(anime.source),
        scored_by: anime.scored_by,
    }
}

fn map_episode(episode: JikanEpisode) -> Episode {
    Episode {
        number: episode.mal_id,
        title: episode.title,
        title_japanese: non_empty(episode.title_japanese),
        title_romanji: non_empty(episode.title_romanji),
        aired: non_empty(episode.aired),
        score: episode.score,
        is_filler: episode.filler,
        is_recap: episode.recap,
    }
}

/// Decodes a seasonal listing envelope.
pub(crate) fn decode_season(body: &Value) -> Result<Vec<AnimeSummary>> {
    let data: Vec<JikanAnime> = json::extract_data(body, "seasonal listing")?;
    Ok(data.iter().map(map_summary).collect())
}

/// Decodes an anime detail envelope.
pub(crate) fn decode_anime(body: &Value, id: u32) -> Result<AnimeDetail> {
    let data: JikanAnime = json::extract_data(body, &format!("anime {}", id))?;
    Ok(map_detail(data))
}

/// Decodes an episode listing envelope.
pub(crate) fn decode_episodes(body: &Value, id: u32) -> Result<Vec<Episode>> {
    let data: Vec<JikanEpisode> = json::extract_data(body, &format!("episodes of anime {}", id))?;
    Ok(data.into_iter().map(map_episode).collect())
}

#[async_trait]
impl Source for JikanSource {
    fn id(&self) -> &'static str {
        "jikan"
    }

    fn name(&self) -> &'static str {
        "Jikan API"
    }

    fn base_url(&self) -> &str {
        &self.api_base
    }

    async fn fetch_season(&self, year: i32, season: Season) -> Result<Vec<AnimeSummary>> {
        let url = self.season_url(year, season);
        let listing = decode_season(&self.get_envelope(&url).await?)?;
        info!(year, season = %season, count = listing.len(), "seasonal listing loaded");
        Ok(listing)
    }

    async fn fetch_anime(&self, id: u32) -> Result<AnimeDetail> {
        let url = self.anime_url(id);
        let detail = decode_anime(&self.get_envelope(&url).await?, id)?;
        info!(id, title = %detail.summary.display_title(), "anime detail loaded");
        Ok(detail)
    }

    async fn fetch_episodes(&self, id: u32) -> Result<Vec<Episode>> {
        let url = self.episodes_url(id);
        let episodes = decode_episodes(&self.get_envelope(&url).await?, id)?;
        info!(id, count = episodes.len(), "episode listing loaded");
        Ok(episodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn seasonal_body() -> Value {
        json!({
            "pagination": {
                "last_visible_page": 3,
                "has_next_page": true,
                "current_page": 1,
                "items": {"count": 2, "total": 61, "per_page": 25}
            },
            "data": [
                {
                    "mal_id": 59027,
                    "title": "Kaoru Hana wa Rin to Saku",
                    "title_english": "The Fragrant Flower Blooms with Dignity",
                    "images": {"jpg": {"image_url": "https://cdn.myanimelist.net/images/anime/1.jpg"}},
                    "synopsis": "Chidori High and Kikyo Girls' sit side by side.",
                    "status": "Currently Airing",
                    "aired": {"from": "2025-07-06T00:00:00+00:00", "string": "Jul 6, 2025 to ?"},
                    "genres": [
                        {"mal_id": 22, "type": "anime", "name": "Romance", "url": ""},
                        {"mal_id": 36, "type": "anime", "name": "Slice of Life", "url": ""}
                    ],
                    "score": 8.71
                },
                {
                    "mal_id": 60000,
                    "title": "Untitled Sequel",
                    "title_english": null,
                    "images": {"jpg": {"image_url": null}},
                    "synopsis": null,
                    "status": "Not yet aired",
                    "aired": {"string": "Not available"},
                    "genres": [],
                    "score": null
                }
            ]
        })
    }

    #[test]
    fn test_season_url_sfw_flag() {
        let source = JikanSource::with_base_url("https://api.jikan.moe/v4/");
        assert_eq!(
            source.season_url(2025, Season::Summer),
            "https://api.jikan.moe/v4/seasons/2025/summer?sfw"
        );

        let source = source.with_sfw(false);
        assert_eq!(
            source.season_url(2024, Season::Fall),
            "https://api.jikan.moe/v4/seasons/2024/fall"
        );
        assert_eq!(source.anime_url(12), "https://api.jikan.moe/v4/anime/12");
        assert_eq!(
            source.episodes_url(12),
            "https://api.jikan.moe/v4/anime/12/episodes"
        );
    }

    #[test]
    fn test_decode_season_maps_optional_fields() {
        let listing = decode_season(&seasonal_body()).unwrap();
        assert_eq!(listing.len(), 2);

        let first = &listing[0];
        assert_eq!(first.id, 59027);
        assert_eq!(first.display_title(), "The Fragrant Flower Blooms with Dignity");
        assert_eq!(first.status, AiringStatus::CurrentlyAiring);
        assert_eq!(first.genres, vec!["Romance", "Slice of Life"]);
        assert_eq!(first.aired, "Jul 6, 2025 to ?");
        assert_eq!(first.score, Some(8.71));

        let second = &listing[1];
        assert_eq!(second.title_english, None);
        assert_eq!(second.display_title(), "Untitled Sequel");
        assert_eq!(second.synopsis, None);
        assert_eq!(second.score, None);
        assert_eq!(second.image_url, "");
        assert_eq!(second.status, AiringStatus::NotYetAired);
    }

    #[test]
    fn test_decode_season_empty_data_is_empty_listing() {
        let listing = decode_season(&json!({"data": [], "pagination": {"has_next_page": false}}))
            .unwrap();
        assert!(listing.is_empty());
    }

    #[test]
    fn test_decode_anime_detail() {
        let body = json!({
            "data": {
                "mal_id": 21,
                "title": "One Piece",
                "title_english": "One Piece",
                "images": {"jpg": {"image_url": "https://cdn.myanimelist.net/images/anime/6/73245.jpg"}},
                "synopsis": "Gol D. Roger was known as the Pirate King.",
                "status": "Currently Airing",
                "aired": {"string": "Oct 20, 1999 to ?"},
                "genres": [{"name": "Action"}, {"name": "Adventure"}, {"name": "Fantasy"}],
                "score": 8.72,
                "episodes": null,
                "studios": [{"mal_id": 18, "name": "Toei Animation"}],
                "rating": "PG-13 - Teens 13 or older",
                "duration": "24 min",
                "popularity": 19,
                "rank": 53,
                "source": "Manga",
                "scored_by": 1500000
            }
        });

        let detail = decode_anime(&body, 21).unwrap();
        assert_eq!(detail.summary.id, 21);
        assert_eq!(detail.episode_count, None);
        assert_eq!(detail.studios, vec!["Toei Animation"]);
        assert_eq!(detail.rating.as_deref(), Some("PG-13 - Teens 13 or older"));
        assert_eq!(detail.rank, Some(53));
    }

    #[test]
    fn test_decode_anime_without_data_is_not_found() {
        let err = decode_anime(&json!({"data": null}), 999).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("anime 999"));
    }

    #[test]
    fn test_decode_episodes_flags() {
        let body = json!({
            "pagination": {"last_visible_page": 1, "has_next_page": false},
            "data": [
                {
                    "mal_id": 1,
                    "title": "I'm Luffy! The Man Who Will Become the Pirate King!",
                    "title_japanese": "俺はルフィ!海賊王になる男だ!",
                    "title_romanji": "Ore wa Luffy! Kaizoku Ou ni Naru Otoko da!",
                    "aired": "1999-10-20T00:00:00+09:00",
                    "score": 4.4,
                    "filler": false,
                    "recap": false
                },
                {
                    "mal_id": 54,
                    "title": "Recap Special",
                    "aired": null,
                    "score": null,
                    "filler": true,
                    "recap": true
                }
            ]
        });

        let episodes = decode_episodes(&body, 21).unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].number, 1);
        assert!(episodes[0].aired.is_some());
        assert_eq!(episodes[1].number, 54);
        assert!(episodes[1].is_filler && episodes[1].is_recap);
        assert_eq!(episodes[1].aired, None);
        assert_eq!(episodes[1].title_japanese, None);
    }


    #[test]
    fn test_null_collections_hide_fields_instead_of_failing() {
        let body = json!({
            "data": {
                "mal_id": 21,
                "title": "One Piece",
                "images": null,
                "aired": null,
                "genres": null,
                "studios": null
            }
        });

        let detail = decode_anime(&body, 21).unwrap();
        assert!(detail.summary.genres.is_empty());
        assert!(detail.studios.is_empty());
        assert_eq!(detail.summary.aired, "");
        assert_eq!(detail.summary.image_url, "");

        // One sparse record must not take the whole listing down
        let listing = decode_season(&json!({
            "data": [
                {"mal_id": 1, "title": "Cowboy Bebop", "genres": null, "aired": null},
                {"mal_id": 2, "title": null, "images": {"jpg": null}, "studios": null}
            ]
        }))
        .unwrap();
        assert_eq!(listing.len(), 2);
        assert!(listing[0].genres.is_empty());
        assert_eq!(listing[1].title, "");

        let episodes = decode_episodes(
            &json!({"data": [{"mal_id": 3, "title": null, "filler": null, "recap": null}]}),
            21,
        )
        .unwrap();
        assert!(!episodes[0].is_filler && !episodes[0].is_recap);
    }

    #[test]
    fn test_decode_episodes_wrong_shape_is_parse_error() {
        let err = decode_episodes(&json!({"data": [{"title": "no id"}]}), 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
