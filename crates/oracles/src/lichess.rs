use std::time::Duration;

use charisma::{EvaluationService, ServiceError};
use reqwest::blocking::Client;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::transport;

#[derive(Debug, Deserialize)]
pub(crate) struct CloudEval {
    #[serde(default)]
    pub pvs: Vec<PrincipalVariation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PrincipalVariation {
    /// Centipawns, White-relative. Absent on forced-mate lines.
    pub cp: Option<i32>,
    pub mate: Option<i32>,
    #[serde(default)]
    pub moves: String,
}

/// Lichess cloud evaluation. Only positions already in the cloud database
/// answer; anything else comes back as a 404.
pub struct LichessCloud {
    client: Client,
    endpoint: Url,
}

impl LichessCloud {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ServiceError> {
        let endpoint = Url::parse(endpoint).map_err(|e| ServiceError::Malformed(e.to_string()))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;
        Ok(Self { client, endpoint })
    }

    fn lookup(&self, fen: &str) -> Result<CloudEval, ServiceError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("fen", fen);
        debug!(%url, "cloud eval request");
        let response = self.client.get(url).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }
        response
            .json::<CloudEval>()
            .map_err(|e| ServiceError::Malformed(e.to_string()))
    }
}

impl EvaluationService for LichessCloud {
    fn evaluate(&self, fen: &str) -> Result<i32, ServiceError> {
        score_of(&self.lookup(fen)?)
    }

    fn best_move(&self, fen: &str) -> Result<String, ServiceError> {
        first_move_of(&self.lookup(fen)?)
    }

    fn name(&self) -> &str {
        "lichess"
    }
}

/// Centipawn score of the principal line. A mate line scores 0.
pub(crate) fn score_of(eval: &CloudEval) -> Result<i32, ServiceError> {
    let pv = eval.pvs.first().ok_or(ServiceError::Empty)?;
    if pv.cp.is_none() {
        debug!(mate = ?pv.mate, "mate line, scoring as level");
    }
    Ok(pv.cp.unwrap_or(0))
}

pub(crate) fn first_move_of(eval: &CloudEval) -> Result<String, ServiceError> {
    eval.pvs
        .first()
        .and_then(|pv| pv.moves.split_whitespace().next())
        .map(str::to_string)
        .ok_or(ServiceError::Empty)
}
