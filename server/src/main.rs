use axum::Json;
use axum::{
    extract::Path,
    http::{HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use dcp_cube::scramble;
use dcp_cube::solver::{self, SolveOptions};

#[tokio::main]
async fn main() {
    let cors = CorsLayer::new()
        .allow_origin("http://127.0.0.1:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET]);
    let app = Router::new()
        .route("/", get(index))
        .route("/solve/:puzzle", get(solve))
        .route("/scramble", get(scramble))
        .layer(cors);

    let app = app.fallback(index);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:32125")
        .await
        .unwrap();
    println!("listening on http://{}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}

async fn index() -> Html<&'static str> {
    Html("<p>Solve a cube: http://localhost:32125/solve/<Facelet String></p>
    Example: <a href=\"http://localhost:32125/solve/DUUBULDBFRBFRRULLLBRDFFFBLURDBFDFDRFRULBLUFDURRBLBDUDL\">http://localhost:32125/solve/DUUBULDBFRBFRRULLLBRDFFFBLURDBFDFDRFRULBLUFDURRBLBDUDL</a>
    <p>Get a scramble: <a href=\"http://localhost:32125/scramble\">http://localhost:32125/scramble</a></p>")
}

async fn scramble() -> String {
    let ss = scramble::gen_scramble(25).unwrap();
    format!("Scramble: {}", scramble::scramble_to_str(&ss).unwrap())
}

#[derive(Serialize)]
struct SolutionResponse {
    solution: String,
    move_count: usize,
}

async fn solve(Path(puzzle): Path<String>) -> Response {
    let result = solver::solve_facelet(
        &puzzle,
        SolveOptions {
            timeout_ms: Some(10_000),
            ..Default::default()
        },
    );

    match result {
        Ok(solution) => {
            let move_count = solution.split_whitespace().count();
            Json(SolutionResponse {
                solution,
                move_count,
            })
            .into_response()
        }
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    }
}
