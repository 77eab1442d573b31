//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), DATA_FILE (snapshot path).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::sync::RwLock;
use table_tennis_pro::{
    add_point, advance_tournament, finish_match, remove_point, start_tournament, Match, MatchId,
    Side, Snapshot, Store, Tournament, TournamentFormat, TournamentId,
};
use uuid::Uuid;

/// All application data plus the store that persists it. The snapshot is
/// saved after every mutating call.
struct AppContext {
    snapshot: Snapshot,
    store: Store,
}

type AppState = Data<RwLock<AppContext>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreatePlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct RenamePlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct CreateMatchBody {
    player_1: Uuid,
    player_2: Uuid,
    #[serde(default = "default_best_of")]
    best_of: u32,
}

#[derive(Deserialize)]
struct PointBody {
    side: Side,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    format: TournamentFormat,
    #[serde(default = "default_best_of")]
    best_of: u32,
}

#[derive(Deserialize)]
struct EntrantBody {
    player_id: Uuid,
}

/// Best of 5 unless the client asks otherwise.
fn default_best_of() -> u32 {
    5
}

/// Path segment: player id (e.g. /api/players/{id})
#[derive(Deserialize)]
struct PlayerPath {
    id: Uuid,
}

/// Path segment: match id (e.g. /api/matches/{id})
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and entrant id.
#[derive(Deserialize)]
struct TournamentEntrantPath {
    id: TournamentId,
    player_id: Uuid,
}

/// Path segments: tournament id and bracket match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn persist(store: &Store, snapshot: &Snapshot) {
    if let Err(e) = store.save_all(snapshot) {
        log::error!("Error saving data: {}", e);
    }
}

fn not_found(what: &str) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": format!("No {}", what) }))
}

fn bad_request(err: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": err.to_string() }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "table-tennis-pro",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.snapshot.roster.players())
}

/// Add a player to the roster. Names are unique, case-insensitive.
#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<CreatePlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    match ctx.snapshot.roster.add(body.name.as_str()) {
        Ok(id) => {
            let resp = HttpResponse::Ok().json(ctx.snapshot.roster.get(id));
            persist(&ctx.store, &ctx.snapshot);
            resp
        }
        Err(e) => bad_request(e),
    }
}

/// Remove a player from the roster. Match history is not rewritten.
#[delete("/api/players/{id}")]
async fn api_remove_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    match ctx.snapshot.roster.remove(path.id) {
        Some(player) => {
            let resp = HttpResponse::Ok().json(player);
            persist(&ctx.store, &ctx.snapshot);
            resp
        }
        None => not_found("player"),
    }
}

/// Rename a player. Identity and stats are untouched.
#[put("/api/players/{id}/name")]
async fn api_rename_player(
    state: AppState,
    path: Path<PlayerPath>,
    body: Json<RenamePlayerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    let name = body.name.trim();
    if name.is_empty() {
        return bad_request("Player name cannot be empty");
    }
    match ctx.snapshot.roster.get_mut(path.id) {
        Some(player) => {
            player.rename(name);
            let resp = HttpResponse::Ok().json(&*player);
            persist(&ctx.store, &ctx.snapshot);
            resp
        }
        None => not_found("player"),
    }
}

#[get("/api/players/{id}/stats")]
async fn api_player_stats(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.snapshot.roster.get(path.id) {
        Some(player) => HttpResponse::Ok().json(player.stats()),
        None => not_found("player"),
    }
}

/// Free-standing matches the player took part in.
#[get("/api/players/{id}/matches")]
async fn api_player_matches(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.snapshot.matches_for_player(path.id))
}

#[get("/api/matches")]
async fn api_list_matches(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(&g.snapshot.matches)
}

/// Create a free-standing match (the live score tracker flow).
#[post("/api/matches")]
async fn api_create_match(state: AppState, body: Json<CreateMatchBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    if ctx.snapshot.roster.get(body.player_1).is_none()
        || ctx.snapshot.roster.get(body.player_2).is_none()
    {
        return not_found("player");
    }
    match Match::new(body.player_1, body.player_2, body.best_of) {
        Ok(m) => {
            ctx.snapshot.matches.push(m);
            let resp = HttpResponse::Ok().json(ctx.snapshot.matches.last());
            persist(&ctx.store, &ctx.snapshot);
            resp
        }
        Err(e) => bad_request(e),
    }
}

/// Add a game to one side of a match. Completing the match applies the
/// result to both players.
#[post("/api/matches/{id}/increment")]
async fn api_match_increment(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<PointBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    let Snapshot {
        roster, matches, ..
    } = &mut ctx.snapshot;
    let Some(m) = matches.iter_mut().find(|m| m.id() == path.id) else {
        return not_found("match");
    };
    add_point(m, body.side, roster);
    let resp = HttpResponse::Ok().json(&*m);
    persist(&ctx.store, &ctx.snapshot);
    resp
}

/// Take a game back from one side of a match.
#[post("/api/matches/{id}/decrement")]
async fn api_match_decrement(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<PointBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    let Some(m) = ctx.snapshot.matches.iter_mut().find(|m| m.id() == path.id) else {
        return not_found("match");
    };
    remove_point(m, body.side);
    let resp = HttpResponse::Ok().json(&*m);
    persist(&ctx.store, &ctx.snapshot);
    resp
}

/// End a match early at the current score.
#[post("/api/matches/{id}/finish")]
async fn api_match_finish(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    let Snapshot {
        roster, matches, ..
    } = &mut ctx.snapshot;
    let Some(m) = matches.iter_mut().find(|m| m.id() == path.id) else {
        return not_found("match");
    };
    match finish_match(m, roster) {
        Ok(()) => {
            let resp = HttpResponse::Ok().json(&*m);
            persist(&ctx.store, &ctx.snapshot);
            resp
        }
        Err(e) => bad_request(e),
    }
}

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(&g.snapshot.tournaments)
}

/// Create a tournament. Double elimination is rejected as unsupported.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    match Tournament::new(body.name.as_str(), body.format, body.best_of) {
        Ok(t) => {
            ctx.snapshot.tournaments.push(t);
            let resp = HttpResponse::Ok().json(ctx.snapshot.tournaments.last());
            persist(&ctx.store, &ctx.snapshot);
            resp
        }
        Err(e) => bad_request(e),
    }
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.snapshot.tournaments.iter().find(|t| t.id == path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => not_found("tournament"),
    }
}

/// Add an entrant (no-op once the tournament has started).
#[post("/api/tournaments/{id}/entrants")]
async fn api_add_entrant(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<EntrantBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    if ctx.snapshot.roster.get(body.player_id).is_none() {
        return not_found("player");
    }
    let Some(t) = ctx.snapshot.tournaments.iter_mut().find(|t| t.id == path.id) else {
        return not_found("tournament");
    };
    t.add_entrant(body.player_id);
    let resp = HttpResponse::Ok().json(&*t);
    persist(&ctx.store, &ctx.snapshot);
    resp
}

/// Remove an entrant (no-op once the tournament has started).
#[delete("/api/tournaments/{id}/entrants/{player_id}")]
async fn api_remove_entrant(state: AppState, path: Path<TournamentEntrantPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    let Some(t) = ctx.snapshot.tournaments.iter_mut().find(|t| t.id == path.id) else {
        return not_found("tournament");
    };
    t.remove_entrant(path.player_id);
    let resp = HttpResponse::Ok().json(&*t);
    persist(&ctx.store, &ctx.snapshot);
    resp
}

/// Start the tournament: seed and generate round 1.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    let Some(t) = ctx.snapshot.tournaments.iter_mut().find(|t| t.id == path.id) else {
        return not_found("tournament");
    };
    match start_tournament(t) {
        Ok(()) => {
            let resp = HttpResponse::Ok().json(&*t);
            persist(&ctx.store, &ctx.snapshot);
            resp
        }
        Err(e) => bad_request(e),
    }
}

/// Advance the bracket once every match of the current round is completed.
#[post("/api/tournaments/{id}/advance")]
async fn api_advance_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    let Some(t) = ctx.snapshot.tournaments.iter_mut().find(|t| t.id == path.id) else {
        return not_found("tournament");
    };
    match advance_tournament(t) {
        Ok(()) => {
            let resp = HttpResponse::Ok().json(&*t);
            persist(&ctx.store, &ctx.snapshot);
            resp
        }
        Err(e) => bad_request(e),
    }
}

/// Add a game to one side of a bracket match.
#[post("/api/tournaments/{id}/matches/{match_id}/increment")]
async fn api_tournament_match_increment(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<PointBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    let Snapshot {
        roster,
        tournaments,
        ..
    } = &mut ctx.snapshot;
    let Some(t) = tournaments.iter_mut().find(|t| t.id == path.id) else {
        return not_found("tournament");
    };
    let Some(m) = t.find_match_mut(path.match_id) else {
        return not_found("match");
    };
    add_point(m, body.side, roster);
    let resp = HttpResponse::Ok().json(&*t);
    persist(&ctx.store, &ctx.snapshot);
    resp
}

/// Take a game back from one side of a bracket match.
#[post("/api/tournaments/{id}/matches/{match_id}/decrement")]
async fn api_tournament_match_decrement(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<PointBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    let Some(t) = ctx.snapshot.tournaments.iter_mut().find(|t| t.id == path.id) else {
        return not_found("tournament");
    };
    let Some(m) = t.find_match_mut(path.match_id) else {
        return not_found("match");
    };
    remove_point(m, body.side);
    let resp = HttpResponse::Ok().json(&*t);
    persist(&ctx.store, &ctx.snapshot);
    resp
}

/// End a bracket match early at the current score.
#[post("/api/tournaments/{id}/matches/{match_id}/finish")]
async fn api_tournament_match_finish(
    state: AppState,
    path: Path<TournamentMatchPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let ctx = &mut *g;
    let Snapshot {
        roster,
        tournaments,
        ..
    } = &mut ctx.snapshot;
    let Some(t) = tournaments.iter_mut().find(|t| t.id == path.id) else {
        return not_found("tournament");
    };
    let Some(m) = t.find_match_mut(path.match_id) else {
        return not_found("match");
    };
    match finish_match(m, roster) {
        Ok(()) => {
            let resp = HttpResponse::Ok().json(&*t);
            persist(&ctx.store, &ctx.snapshot);
            resp
        }
        Err(e) => bad_request(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_file() -> String {
    "tabletennis_data.json".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_file = std::env::var("DATA_FILE").unwrap_or_else(|_| default_data_file());
    let bind = (host.as_str(), port);

    let store = Store::new(&data_file);
    let snapshot = store.load_all();
    log::info!(
        "Loaded {} players, {} matches, {} tournaments from {}",
        snapshot.roster.len(),
        snapshot.matches.len(),
        snapshot.tournaments.len(),
        data_file
    );
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(AppContext { snapshot, store }));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_list_players)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_rename_player)
            .service(api_player_stats)
            .service(api_player_matches)
            .service(api_list_matches)
            .service(api_create_match)
            .service(api_match_increment)
            .service(api_match_decrement)
            .service(api_match_finish)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_entrant)
            .service(api_remove_entrant)
            .service(api_start_tournament)
            .service(api_advance_tournament)
            .service(api_tournament_match_increment)
            .service(api_tournament_match_decrement)
            .service(api_tournament_match_finish)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
