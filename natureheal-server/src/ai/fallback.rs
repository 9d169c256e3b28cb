//! Degraded responses for when the language model is absent or misbehaves.
//!
//! None of these are [`ServerError`](crate::error::ServerError)s: they are
//! ordinary responses whose status code and body tell the client the result
//! is not model-generated.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

/// Reply sent by chat when no model is configured.
pub const CHAT_UNAVAILABLE_REPLY: &str = "I'm sorry, but the AI service is currently not configured. \
     Please contact support for assistance with natural health questions.";

/// A canned status + body pair.
#[derive(Debug, Clone)]
pub struct Fallback {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for Fallback {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Either the generated payload or the fallback that replaced it.
#[derive(Debug)]
pub enum Outcome<T> {
    Generated(T),
    Degraded(Fallback),
}

impl<T: IntoResponse> IntoResponse for Outcome<T> {
    fn into_response(self) -> Response {
        match self {
            Outcome::Generated(inner) => inner.into_response(),
            Outcome::Degraded(fallback) => fallback.into_response(),
        }
    }
}

// ── diet plan ────────────────────────────────────────────────────────────────

pub fn diet_not_configured() -> Fallback {
    Fallback {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: json!({
            "error": "AI service not available",
            "fallback": true,
            "message": "Using basic diet plan generation",
        }),
    }
}

pub fn diet_unparseable() -> Fallback {
    Fallback {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: json!({ "error": "Failed to generate diet plan", "fallback": true }),
    }
}

pub fn diet_gateway_failed() -> Fallback {
    Fallback {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: json!({ "error": "AI service temporarily unavailable", "fallback": true }),
    }
}

// ── health insights ──────────────────────────────────────────────────────────

pub fn insights_not_configured() -> Fallback {
    Fallback {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: json!({
            "error": "AI service not available",
            "insights": {
                "patterns": ["Unable to analyze patterns - AI service unavailable"],
                "recommendations": ["Please try again later"],
                "correlations": [],
            },
        }),
    }
}

/// Substituted for the model's insights when its output cannot be parsed; served with 200.
pub fn placeholder_insights() -> Value {
    json!({
        "patterns": ["Data analysis completed"],
        "recommendations": ["Continue tracking your health metrics"],
        "correlations": ["More data needed for detailed correlations"],
        "predictions": [],
        "risks": [],
        "strengths": ["Consistent health tracking"],
    })
}

pub fn insights_gateway_failed() -> Fallback {
    Fallback {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: json!({
            "error": "Failed to generate health insights",
            "insights": {
                "patterns": ["Unable to analyze patterns at this time"],
                "recommendations": ["Please try again later"],
                "correlations": [],
            },
        }),
    }
}

// ── health predictions ───────────────────────────────────────────────────────

pub fn predictions_not_configured() -> Fallback {
    Fallback {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: json!({
            "error": "AI service not available",
            "predictions": {
                "shortTerm": ["Predictions unavailable"],
                "longTerm": ["Please try again later"],
                "recommendations": [],
            },
        }),
    }
}

/// Substituted for the model's predictions when its output cannot be parsed; served with 200.
pub fn placeholder_predictions() -> Value {
    json!({
        "shortTerm": ["Predictions being calculated"],
        "longTerm": ["Long-term outlook positive with consistent effort"],
        "recommendations": ["Continue current healthy habits"],
        "milestones": [],
        "challenges": [],
        "successFactors": ["Consistency", "Patience"],
    })
}

pub fn predictions_gateway_failed() -> Fallback {
    Fallback {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: json!({
            "error": "Failed to generate predictions",
            "predictions": {
                "shortTerm": ["Unable to generate predictions at this time"],
                "longTerm": ["Please consult with healthcare professional for long-term planning"],
                "recommendations": ["Focus on consistent healthy habits"],
            },
        }),
    }
}
