//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::connectors::{Connector, MeasuredLayout};
use crate::domain::{DragOutcome, MatchingQuestion, MatchingResponse};
use crate::exercise::{Celebration, SessionView, SoundCue};
use crate::store::SubmissionRecord;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    ListQuestions,
    StartSession(StartSessionIn),
    BeginDrag {
        #[serde(rename = "sessionId")]
        session_id: String,
        #[serde(rename = "itemId")]
        item_id: String,
    },
    CompleteDrag {
        #[serde(rename = "sessionId")]
        session_id: String,
        #[serde(rename = "activeId")]
        active_id: String,
        #[serde(rename = "overId")]
        over_id: String,
    },
    Reset {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Snapshot {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    SetSounds {
        #[serde(rename = "sessionId")]
        session_id: String,
        muted: bool,
    },
    Layout {
        #[serde(rename = "sessionId")]
        session_id: String,
        layout: MeasuredLayout,
    },
    Submit {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    Close {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Questions {
        questions: Vec<QuestionSummary>,
    },
    Session(SessionOut),
    DragStarted(DragStartOut),
    DragResult(DragOut),
    Connectors(ConnectorsOut),
    Submitted {
        submission: SubmissionRecord,
    },
    Closed(ClosedOut),
    Error {
        message: String,
    },
}

/// Question listing entry; never carries the answer key.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    pub id: String,
    pub question_text: String,
    pub pair_count: usize,
}

pub fn to_summary(q: &MatchingQuestion) -> QuestionSummary {
    QuestionSummary {
        id: q.id.clone(),
        question_text: q.question_text.clone(),
        pair_count: q.pairs.len(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionIn {
    pub question_id: String,
    #[serde(default)]
    pub prior_answer: Option<MatchingResponse>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub sounds_muted: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOut {
    pub session_id: String,
    pub submission_id: String,
    pub saved: bool,
    pub view: SessionView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragStartOut {
    pub cue: Option<SoundCue>,
    pub view: SessionView,
}

/// Outcome of the host's best-effort save after a solve.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaveStatus {
    Saved {
        #[serde(rename = "submissionId")]
        submission_id: String,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragOut {
    pub outcome: DragOutcome,
    pub celebration: Option<Celebration>,
    pub save: Option<SaveStatus>,
    pub view: SessionView,
}

/// Reply to a close; `saved` tells whether an answer was stored first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedOut {
    pub session_id: String,
    pub saved: bool,
}

#[derive(Debug, Serialize)]
pub struct ConnectorsOut {
    pub connectors: Vec<Connector>,
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginDragIn {
    pub item_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteDragIn {
    pub active_id: String,
    pub over_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SoundsIn {
    pub muted: bool,
}

#[derive(Debug, Serialize)]
pub struct QuestionsOut {
    pub questions: Vec<QuestionSummary>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionsOut {
    pub submissions: Vec<SubmissionRecord>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
