use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use onam_core::{
    api::{CleanupResponse, ClearResponse, ErrorResponse, SubmitResponse},
    leaderboard::{Entry, Leaderboard},
};
use serde_json::Value;

use crate::{error::AppError, store::Storage};

pub struct AppState {
    pub storage: Storage,
}

/// GET /leaderboard
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Entry>>, AppError> {
    let (board, _) = state.storage.load().await?;
    Ok(Json(board.entries().to_vec()))
}

/// POST /leaderboard
///
/// The body is taken as a raw JSON value so a missing name or a non-numeric
/// score answers 400, matching the original's hand validation.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let Some((name, score)) = parse_submit(&body) else {
        return Ok(invalid_data());
    };

    let (mut board, _) = state.storage.load().await?;
    board.submit(Entry::new(&name, score));
    let kv_available = state.storage.save(&board).await?;

    Ok(Json(SubmitResponse {
        success: true,
        leaderboard: board.entries().to_vec(),
        kv_available,
    })
    .into_response())
}

/// DELETE /leaderboard
pub async fn clear(State(state): State<Arc<AppState>>) -> Result<Json<ClearResponse>, AppError> {
    state.storage.save(&Leaderboard::new()).await?;
    Ok(Json(ClearResponse { success: true }))
}

/// POST /leaderboard/cleanup
pub async fn cleanup(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CleanupResponse>, AppError> {
    let (mut board, _) = state.storage.load().await?;
    let (before, after) = board.cleanup();
    state.storage.save(&board).await?;

    Ok(Json(CleanupResponse {
        success: true,
        message: "Leaderboard cleaned up".to_owned(),
        before,
        after,
        leaderboard: board.entries().to_vec(),
    }))
}

fn parse_submit(body: &Value) -> Option<(String, u32)> {
    let name = body.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let score = u32::try_from(body.get("score")?.as_u64()?).ok()?;
    Some((name.to_owned(), score))
}

fn invalid_data() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Invalid data".to_owned(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn state(tag: &str) -> Arc<AppState> {
        let path =
            std::env::temp_dir().join(format!("onam-routes-{tag}-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        Arc::new(AppState {
            storage: Storage::mirror_only(path),
        })
    }

    #[test]
    fn parse_submit_accepts_a_trimmed_name_and_integer_score() {
        let body = json!({"name": "  Alice ", "score": 50});
        assert_eq!(parse_submit(&body), Some(("Alice".to_owned(), 50)));
    }

    #[test]
    fn parse_submit_rejects_bad_payloads() {
        for body in [
            json!({"score": 50}),
            json!({"name": "", "score": 50}),
            json!({"name": "   ", "score": 50}),
            json!({"name": "Alice"}),
            json!({"name": "Alice", "score": "50"}),
            json!({"name": "Alice", "score": -1}),
            json!({"name": 3, "score": 50}),
        ] {
            assert_eq!(parse_submit(&body), None, "accepted {body}");
        }
    }

    #[tokio::test]
    async fn submit_rejects_invalid_data_with_400() {
        let state = state("invalid");
        let response = submit(State(state.clone()), Json(json!({"name": ""})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Nothing was written.
        let (board, _) = state.storage.load().await.unwrap();
        assert!(board.is_empty());
    }

    #[tokio::test]
    async fn submit_list_clear_flow() {
        let state = state("flow");

        let response = submit(
            State(state.clone()),
            Json(json!({"name": "Alice", "score": 50})),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        submit(
            State(state.clone()),
            Json(json!({"name": "alice", "score": 30})),
        )
        .await
        .unwrap();
        submit(
            State(state.clone()),
            Json(json!({"name": "Bob", "score": 40})),
        )
        .await
        .unwrap();

        let Json(entries) = list(State(state.clone())).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Alice");
        assert_eq!(entries[0].score, 50);
        assert_eq!(entries[1].name, "Bob");

        let Json(cleared) = clear(State(state.clone())).await.unwrap();
        assert!(cleared.success);
        let Json(entries) = list(State(state)).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn cleanup_reports_before_and_after_counts() {
        let state = state("cleanup");

        // Seed a legacy list with duplicates, bypassing submit's dedup.
        let board = Leaderboard::from_entries(vec![
            Entry::new("Alice", 30),
            Entry::new("alice", 50),
            Entry::new("Bob", 10),
        ]);
        state.storage.save(&board).await.unwrap();

        let Json(response) = cleanup(State(state)).await.unwrap();
        assert!(response.success);
        assert_eq!((response.before, response.after), (3, 2));
        assert_eq!(response.leaderboard[0].score, 50);
    }
}
