//! Single binary web server: hosts Swiss brackets in memory behind a small JSON API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 127.0.0.1), PORT (e.g. 8080).

use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use swiss_bracket::{
    apply_replay, Bracket, BracketConfig, BracketError, RandomSeeding, ReplayError, ReplayLog,
};
use uuid::Uuid;

/// Unique identifier for a hosted bracket.
type BracketId = Uuid;

/// Per-bracket entry: bracket data + last activity time (for auto-cleanup).
struct BracketEntry {
    bracket: Bracket,
    last_activity: Instant,
}

/// In-memory state: many brackets by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<BracketId, BracketEntry>>>;

/// Inactivity threshold: brackets not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(serde::Serialize)]
struct CreatedResponse<'a> {
    id: BracketId,
    bracket: &'a Bracket,
}

#[derive(Deserialize)]
struct SetMatchResultBody {
    upper_team_wins: u32,
    lower_team_wins: u32,
}

/// Path segment: bracket id (e.g. /api/brackets/{id})
#[derive(Deserialize)]
struct BracketPath {
    id: BracketId,
}

/// Path segments: bracket id, round record and match index
/// (e.g. /api/brackets/{id}/rounds/1-0/matches/2)
#[derive(Deserialize)]
struct MatchPath {
    id: BracketId,
    record: String,
    index: usize,
}

fn error_response(e: &BracketError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    if e.is_not_found() {
        HttpResponse::NotFound().json(body)
    } else {
        HttpResponse::BadRequest().json(body)
    }
}

fn no_bracket() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No bracket" }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "swiss-bracket",
    })
}

/// Create a new bracket (returns it with id; client stores id for subsequent requests).
#[post("/api/brackets")]
async fn api_create_bracket(state: AppState, body: Option<Json<BracketConfig>>) -> HttpResponse {
    let config = body.map(|b| b.into_inner()).unwrap_or_default();
    let bracket = match Bracket::from_config(&config, &mut RandomSeeding::new(rand::thread_rng())) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("Rejected bracket config {:?}: {}", config, e);
            return error_response(&e);
        }
    };
    let id = Uuid::new_v4();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = g.entry(id).or_insert(BracketEntry {
        bracket,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(CreatedResponse {
        id,
        bracket: &entry.bracket,
    })
}

/// Get a bracket by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/brackets/{id}")]
async fn api_get_bracket(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.bracket)
        }
        None => no_bracket(),
    }
}

/// Plain-text view of every round, level by level.
#[get("/api/brackets/{id}/levels")]
async fn api_levels(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(entry.bracket.render_levels())
        }
        None => no_bracket(),
    }
}

/// Standings: every team with its totals and advanced/active/eliminated status.
#[get("/api/brackets/{id}/standings")]
async fn api_standings(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(serde_json::json!({
                "complete": entry.bracket.is_complete(),
                "standings": entry.bracket.standings(),
            }))
        }
        None => no_bracket(),
    }
}

/// Get one match record (404 if the round/match does not exist, null if not yet paired).
#[get("/api/brackets/{id}/rounds/{record}/matches/{index}")]
async fn api_get_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_bracket(),
    };
    entry.last_activity = Instant::now();
    let b = &entry.bracket;
    let round = match b.round_id(&path.record) {
        Ok(id) => b.round(id),
        Err(e) => return error_response(&e),
    };
    match round.matches.get(path.index) {
        Some(m) => HttpResponse::Ok().json(m),
        None => error_response(&BracketError::MatchNotFound {
            round: round.record,
            index: path.index,
        }),
    }
}

/// Set the score of a paired match; later rounds are cleared and re-paired.
#[put("/api/brackets/{id}/rounds/{record}/matches/{index}")]
async fn api_set_match_result(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<SetMatchResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_bracket(),
    };
    entry.last_activity = Instant::now();
    let b = &mut entry.bracket;
    match b.set_match_result(&path.record, path.index, body.upper_team_wins, body.lower_team_wins) {
        Ok(()) => HttpResponse::Ok().json(&*b),
        Err(e) => {
            log::warn!("Rejected result for {} #{}: {}", path.record, path.index, e);
            error_response(&e)
        }
    }
}

/// Apply a list of recorded results in order (stops at the first failure).
#[post("/api/brackets/{id}/replay")]
async fn api_replay(
    state: AppState,
    path: Path<BracketPath>,
    body: Json<ReplayLog>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_bracket(),
    };
    entry.last_activity = Instant::now();
    let b = &mut entry.bracket;
    match apply_replay(b, &body) {
        Ok(_) => HttpResponse::Ok().json(&*b),
        Err(ReplayError::Bracket { source, .. }) if source.is_not_found() => {
            error_response(&source)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Clear every result and go back to the opening pairings.
#[post("/api/brackets/{id}/reset")]
async fn api_reset(state: AppState, path: Path<BracketPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            entry.bracket.reset();
            HttpResponse::Ok().json(&entry.bracket)
        }
        None => no_bracket(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<BracketId, BracketEntry>::new()));

    // Background task: every 30 minutes, remove brackets inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive bracket(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_bracket)
            .service(api_get_bracket)
            .service(api_levels)
            .service(api_standings)
            .service(api_get_match)
            .service(api_set_match_result)
            .service(api_replay)
            .service(api_reset)
    })
    .bind(bind)?
    .run()
    .await
}
