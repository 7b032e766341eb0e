use crate::config::AppConfig;
use crate::models::{DogPartner, TarotCard, WeatherReading};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const FALLBACK_TAROT_NAME: &str = "The Fool";
pub const FALLBACK_TAROT_MEANING: &str = "new beginnings (fallback — connection failed)";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("api key missing")]
    MissingKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Deserialize)]
struct WeatherBody {
    main: WeatherMain,
    weather: Vec<WeatherEntry>,
}

#[derive(Deserialize)]
struct WeatherMain {
    temp: f64,
}

#[derive(Deserialize)]
struct WeatherEntry {
    description: String,
    main: String,
}

#[derive(Deserialize)]
struct DogBody {
    message: String,
}

#[derive(Deserialize)]
struct TarotBody {
    cards: Vec<TarotEntry>,
}

#[derive(Deserialize)]
struct TarotEntry {
    name: String,
    meaning_up: String,
    #[serde(default)]
    desc: String,
}

/// The three read-only public APIs. Each call is best effort with a fixed timeout.
#[derive(Clone)]
pub struct Gateways {
    client: Client,
    weather_url: String,
    dog_url: String,
    tarot_url: String,
}

impl Gateways {
    pub fn new(client: Client, config: &AppConfig) -> Self {
        Self {
            client,
            weather_url: config.weather_url.clone(),
            dog_url: config.dog_url.clone(),
            tarot_url: config.tarot_url.clone(),
        }
    }

    pub async fn try_fetch_weather(&self, city: &str, api_key: &str) -> Result<WeatherReading, GatewayError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(GatewayError::MissingKey);
        }

        let response = self
            .client
            .get(&self.weather_url)
            .query(&[("q", city), ("appid", api_key), ("lang", "kr"), ("units", "metric")])
            .send()
            .await?;
        let body: WeatherBody = success_json(response).await?;
        let first = body
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Malformed("empty weather array".into()))?;

        Ok(WeatherReading {
            temperature: body.main.temp,
            description: first.description,
            condition: first.main,
        })
    }

    pub async fn fetch_weather(&self, city: &str, api_key: &str) -> Option<WeatherReading> {
        match self.try_fetch_weather(city, api_key).await {
            Ok(reading) => Some(reading),
            Err(GatewayError::MissingKey) => {
                debug!("weather key not set, skipping lookup");
                None
            }
            Err(err) => {
                warn!("weather lookup for {city} failed: {err}");
                None
            }
        }
    }

    pub async fn try_fetch_dog_partner(&self) -> Result<DogPartner, GatewayError> {
        let response = self.client.get(&self.dog_url).send().await?;
        let body: DogBody = success_json(response).await?;
        let breed = breed_from_image_url(&body.message)
            .ok_or_else(|| GatewayError::Malformed(format!("no breed in {}", body.message)))?;

        Ok(DogPartner {
            image_url: body.message,
            breed,
        })
    }

    pub async fn fetch_dog_partner(&self) -> Option<DogPartner> {
        self.try_fetch_dog_partner()
            .await
            .inspect_err(|err| warn!("dog image lookup failed: {err}"))
            .ok()
    }

    pub async fn try_fetch_tarot_card(&self) -> Result<TarotCard, GatewayError> {
        let response = self.client.get(&self.tarot_url).query(&[("n", "1")]).send().await?;
        let body: TarotBody = success_json(response).await?;
        let card = body
            .cards
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Malformed("empty cards array".into()))?;

        Ok(TarotCard {
            name: card.name,
            meaning: card.meaning_up,
            description: card.desc,
        })
    }

    /// Never fails: a broken connection yields [`fallback_tarot_card`].
    pub async fn fetch_tarot_card(&self) -> TarotCard {
        match self.try_fetch_tarot_card().await {
            Ok(card) => card,
            Err(err) => {
                warn!("tarot draw failed, using fallback card: {err}");
                fallback_tarot_card()
            }
        }
    }
}

pub fn fallback_tarot_card() -> TarotCard {
    TarotCard {
        name: FALLBACK_TAROT_NAME.to_string(),
        meaning: FALLBACK_TAROT_MEANING.to_string(),
        description: String::new(),
    }
}

/// `.../breeds/retriever-golden/image.jpg` -> `Retriever Golden`.
pub fn breed_from_image_url(url: &str) -> Option<String> {
    let segments: Vec<&str> = url.split('/').collect();
    if segments.len() < 2 {
        return None;
    }
    let raw = segments[segments.len() - 2].trim();
    if raw.is_empty() {
        return None;
    }

    let breed = raw
        .split('-')
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ");
    Some(breed)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

async fn success_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
    let status = response.status();
    if status != StatusCode::OK {
        return Err(GatewayError::Status(status));
    }
    response
        .json::<T>()
        .await
        .map_err(|err| GatewayError::Malformed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::time::Duration;

    fn gateways(server: &MockServer) -> Gateways {
        let config = AppConfig {
            weather_url: server.url("/weather"),
            dog_url: server.url("/dog"),
            tarot_url: server.url("/tarot"),
            ..AppConfig::default()
        };
        let client = Client::builder().timeout(Duration::from_secs(2)).build().unwrap();
        Gateways::new(client, &config)
    }

    #[test]
    fn breed_is_second_to_last_segment_title_cased() {
        assert_eq!(
            breed_from_image_url("https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg").as_deref(),
            Some("Hound Afghan")
        );
        assert_eq!(
            breed_from_image_url(".../breeds/retriever-golden/image.jpg").as_deref(),
            Some("Retriever Golden")
        );
        assert_eq!(breed_from_image_url("labrador").as_deref(), None);
    }

    #[tokio::test]
    async fn weather_without_key_makes_no_call() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/weather");
                then.status(200);
            })
            .await;

        let gateways = gateways(&server);
        assert!(matches!(
            gateways.try_fetch_weather("Seoul", "  ").await,
            Err(GatewayError::MissingKey)
        ));
        assert!(gateways.fetch_weather("Seoul", "").await.is_none());
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn weather_non_200_is_absent() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/weather");
                then.status(401).json_body(json!({ "message": "Invalid API key" }));
            })
            .await;

        let gateways = gateways(&server);
        assert!(matches!(
            gateways.try_fetch_weather("Seoul", "bad").await,
            Err(GatewayError::Status(StatusCode::UNAUTHORIZED))
        ));
        assert!(gateways.fetch_weather("Seoul", "bad").await.is_none());
    }

    #[tokio::test]
    async fn weather_parses_first_entry() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/weather")
                    .query_param("q", "Busan")
                    .query_param("appid", "k")
                    .query_param("lang", "kr")
                    .query_param("units", "metric");
                then.status(200).json_body(json!({
                    "main": { "temp": 22.5 },
                    "weather": [
                        { "description": "clear sky", "main": "Clear" },
                        { "description": "mist", "main": "Mist" }
                    ]
                }));
            })
            .await;

        let reading = gateways(&server).fetch_weather("Busan", "k").await.unwrap();
        mock.assert_async().await;
        assert_eq!(reading.temperature, 22.5);
        assert_eq!(reading.description, "clear sky");
        assert_eq!(reading.condition, "Clear");
    }

    #[tokio::test]
    async fn dog_partner_derives_breed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/dog");
                then.status(200).json_body(json!({
                    "message": "https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg",
                    "status": "success"
                }));
            })
            .await;

        let dog = gateways(&server).fetch_dog_partner().await.unwrap();
        assert_eq!(dog.breed, "Hound Afghan");
        assert!(dog.image_url.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn dog_partner_absent_on_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/dog");
                then.status(503);
            })
            .await;

        assert!(gateways(&server).fetch_dog_partner().await.is_none());
    }

    #[tokio::test]
    async fn tarot_maps_first_card() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/tarot").query_param("n", "1");
                then.status(200).json_body(json!({
                    "nhits": 1,
                    "cards": [{
                        "name": "The Star",
                        "meaning_up": "hope and renewal",
                        "desc": "A woman kneels by a pool."
                    }]
                }));
            })
            .await;

        let card = gateways(&server).fetch_tarot_card().await;
        mock.assert_async().await;
        assert_eq!(card.name, "The Star");
        assert_eq!(card.meaning, "hope and renewal");
        assert_eq!(card.description, "A woman kneels by a pool.");
    }

    #[tokio::test]
    async fn tarot_falls_back_to_the_fool() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/tarot");
                then.status(500);
            })
            .await;

        let card = gateways(&server).fetch_tarot_card().await;
        assert_eq!(card.name, "The Fool");
        assert!(!card.meaning.is_empty());
        assert!(card.description.is_empty());
    }
}
