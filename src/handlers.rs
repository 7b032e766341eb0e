use crate::errors::AppError;
use crate::gateways::GatewayError;
use crate::habits::{build_snapshot, flags_from_keys};
use crate::models::{
    CITIES, CheckinRequest, HABITS, HabitOption, KeysRequest, MOOD_MAX, MOOD_MIN, OptionsResponse, Persona,
    PersonaOption, ReportBody, ReportRequest, ReportResponse, SessionResponse,
};
use crate::session::SessionContext;
use crate::state::AppState;
use crate::tarot_gate::UNLOCK_THRESHOLD;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use tracing::{info, warn};

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        habits: HABITS.iter().map(|&(key, label)| HabitOption { key, label }).collect(),
        cities: CITIES.to_vec(),
        personas: Persona::ALL
            .iter()
            .map(|persona| PersonaOption {
                key: persona.key(),
                label: persona.label(),
            })
            .collect(),
        unlock_threshold: UNLOCK_THRESHOLD,
    })
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(to_response(&session))
}

pub async fn checkin(
    State(state): State<AppState>,
    Json(payload): Json<CheckinRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mood = u8::try_from(payload.mood)
        .ok()
        .filter(|mood| (MOOD_MIN..=MOOD_MAX).contains(mood))
        .ok_or_else(|| AppError::bad_request(format!("mood must be between {MOOD_MIN} and {MOOD_MAX}")))?;
    let flags = flags_from_keys(&payload.habits)
        .map_err(|key| AppError::bad_request(format!("unknown habit '{key}'")))?;

    let mut session = state.session.lock().await;
    session.apply_snapshot(build_snapshot(flags, mood));
    Ok(Json(to_response(&session)))
}

pub async fn set_keys(
    State(state): State<AppState>,
    Json(payload): Json<KeysRequest>,
) -> Json<SessionResponse> {
    let mut session = state.session.lock().await;
    if let Some(key) = payload.model_api_key.as_deref() {
        session.set_model_api_key(key);
    }
    if let Some(key) = payload.weather_api_key.as_deref() {
        session.set_weather_api_key(key);
    }
    Json(to_response(&session))
}

pub async fn draw_tarot(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    state.session.lock().await.ensure_unlocked()?;

    // no lock held across the network call
    let card = state.gateways.fetch_tarot_card().await;

    let mut session = state.session.lock().await;
    session.store_draw(card)?;
    Ok(Json(to_response(&session)))
}

pub async fn reset_tarot(State(state): State<AppState>) -> Json<SessionResponse> {
    let mut session = state.session.lock().await;
    session.clear_tarot();
    Json(to_response(&session))
}

pub async fn report(
    State(state): State<AppState>,
    Json(payload): Json<ReportBody>,
) -> Result<Json<ReportResponse>, AppError> {
    let city = CITIES
        .iter()
        .find(|name| name.eq_ignore_ascii_case(payload.city.trim()))
        .copied()
        .ok_or_else(|| AppError::bad_request(format!("unknown city '{}'", payload.city)))?;

    let (model_key, weather_key, snapshot, tarot) = {
        let session = state.session.lock().await;
        (
            session.model_api_key().to_string(),
            session.weather_api_key().to_string(),
            session.snapshot().clone(),
            session.tarot().cloned(),
        )
    };
    if model_key.is_empty() {
        return Err(AppError::bad_request("A model API key is required for a reading."));
    }

    let mut notices = Vec::new();
    let weather = match state.gateways.try_fetch_weather(city, &weather_key).await {
        Ok(reading) => Some(reading),
        Err(GatewayError::MissingKey) => {
            notices.push("No weather key set; weather left out of the reading.".to_string());
            None
        }
        Err(err) => {
            warn!("weather lookup for {city} failed: {err}");
            notices.push(format!("Could not fetch weather for {city}."));
            None
        }
    };
    let dog = state.gateways.fetch_dog_partner().await;
    if dog.is_none() {
        notices.push("Could not fetch a lucky partner.".to_string());
    }

    let persona = payload.persona.trim().to_string();
    let request = ReportRequest {
        persona_key: persona.clone(),
        snapshot,
        weather: weather.clone(),
        dog_breed: dog.as_ref().map(|d| d.breed.clone()),
        tarot: tarot.clone(),
    };
    info!(%city, %persona, rate = request.snapshot.completion_rate, "generating report");
    let report = state.composer.compose(&model_key, &request).await;

    Ok(Json(ReportResponse {
        city: city.to_string(),
        persona,
        weather,
        dog,
        tarot,
        report,
        notices,
    }))
}

fn to_response(session: &SessionContext) -> SessionResponse {
    let snapshot = session.snapshot().clone();
    SessionResponse {
        completed_count: snapshot.labels_completed.len(),
        snapshot,
        gate: session.gate(),
        tarot: session.tarot().cloned(),
        tarot_excerpt: session.tarot_excerpt(),
        chart: session.chart(),
        has_model_key: !session.model_api_key().is_empty(),
        has_weather_key: !session.weather_api_key().is_empty(),
    }
}
