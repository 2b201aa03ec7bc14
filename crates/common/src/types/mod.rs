use serde::Serialize;

/// Liveness probe payload returned by `GET /health`.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub const fn ok() -> Self {
        Self { status: "ok" }
    }
}
