// © 2023-2024 ETH Zurich
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// any later version.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use axum::response::IntoResponse;

#[tokio::main]
pub async fn main() {
    let app = axum::Router::new()
        .fallback(axum::routing::get(|| async {
            "No Route! Use /health, /demo or /solve"
        }))
        .route("/health", axum::routing::get(healthy))
        .route("/demo", axum::routing::get(demo))
        .route("/solve", axum::routing::post(solve));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    println!("Server running on port 3000 (http://localhost:3000/health)");
    axum::serve(listener, app).await.unwrap();
}

pub async fn healthy() -> &'static str {
    println!("Healthy");
    "Healthy"
}

pub async fn solve(
    axum::extract::Json(input_data): axum::extract::Json<serde_json::Value>,
) -> axum::response::Response {
    println!("Solving");
    respond(server::solve_instance(input_data))
}

pub async fn demo() -> axum::response::Response {
    println!("Solving the dummy instance");
    respond(server::solve_instance(server::dummy_data::dummy_instance()))
}

fn respond(
    result: Result<serde_json::Value, server::PlanningError>,
) -> axum::response::Response {
    match result {
        Ok(output) => axum::response::Json(output).into_response(),
        // invalid input is the client's fault; an extraction failure is ours
        Err(error @ server::PlanningError::Input(_)) => (
            axum::http::StatusCode::UNPROCESSABLE_ENTITY,
            axum::response::Json(serde_json::json!({"error": error.to_string()})),
        )
            .into_response(),
        Err(error @ server::PlanningError::Solve(_)) => (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            axum::response::Json(serde_json::json!({"error": error.to_string()})),
        )
            .into_response(),
    }
}
