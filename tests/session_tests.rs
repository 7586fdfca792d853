//! Tests for the session driver and the interrupt/resume bridge.

mod common;

use std::sync::Arc;

use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;

use concierge::aggregate::{Emission, SessionPhase};
use concierge::error::ConciergeError;
use concierge::runtime::{RunInput, SessionConfig};
use concierge::session::{ResumePolicy, Session, ERROR_FALLBACK};
use concierge::types::{ChatMessage, ResumeCommand};

use common::{ok_script, ScriptedRuntime};

async fn drain(mut stream: concierge::session::EmissionStream) -> Vec<Emission> {
    let mut emissions = Vec::new();
    while let Some(item) = stream.next().await {
        emissions.push(item.unwrap());
    }
    emissions
}

#[tokio::test]
async fn manual_interrupt_pauses_until_resume() {
    let runtime = Arc::new(
        ScriptedRuntime::new(ok_script(vec![
            json!({"agent": {"messages": [{"content": "Checking availability"}]}}),
            json!({"__interrupt__": [{"value": "Approve booking?"}]}),
        ]))
        .with_resume_script(ok_script(vec![
            json!({"tools": {"messages": [{"content": "Successfully booked a stay at the Ritz."}]}}),
        ])),
    );
    let session = Session::from_arc(Arc::clone(&runtime), SessionConfig::new("thread-1"));

    let stream = session
        .stream(RunInput::from_user("Book the Ritz"))
        .await
        .unwrap();
    let emissions = drain(stream).await;
    assert_eq!(
        emissions,
        vec![
            Emission::Text("Checking availability".to_string()),
            Emission::Interrupt("Approve booking?".to_string()),
        ]
    );
    assert_eq!(session.phase(), SessionPhase::Paused);
    assert!(runtime.resume_commands.lock().unwrap().is_empty());

    let resumed = session.resume(ResumeCommand::Approve).await.unwrap();
    let emissions = drain(resumed).await;
    assert_eq!(
        emissions,
        vec![Emission::ToolOutput {
            text: "Successfully booked a stay at the Ritz.".to_string(),
            is_error: false,
        }]
    );
    assert_eq!(session.phase(), SessionPhase::Running);
    assert_eq!(
        *runtime.resume_commands.lock().unwrap(),
        vec![ResumeCommand::Approve]
    );
}

#[tokio::test]
async fn auto_resume_splices_resumed_chunks_into_one_stream() {
    let runtime = Arc::new(
        ScriptedRuntime::new(ok_script(vec![
            json!({"__interrupt__": [{"value": "Approve booking?"}]}),
        ]))
        .with_resume_script(ok_script(vec![
            json!({"agent": {"messages": [{"content": "Booked!"}]}}),
        ])),
    );
    let session = Session::from_arc(Arc::clone(&runtime), SessionConfig::new("thread-1"))
        .with_resume_policy(ResumePolicy::Auto(ResumeCommand::Approve));

    let stream = session
        .stream(RunInput::from_user("Book the Ritz"))
        .await
        .unwrap();
    let emissions = drain(stream).await;

    assert_eq!(
        emissions,
        vec![
            Emission::Interrupt("Approve booking?".to_string()),
            Emission::Text("Booked!".to_string()),
        ]
    );
    assert_eq!(
        *runtime.resume_commands.lock().unwrap(),
        vec![ResumeCommand::Approve]
    );
    assert_eq!(session.phase(), SessionPhase::Running);
}

#[tokio::test]
async fn auto_resume_keeps_the_processed_id_set_across_the_splice() {
    let runtime = Arc::new(
        ScriptedRuntime::new(ok_script(vec![
            json!({"flight_assistant": {"messages": [{"id": "m1", "type": "ai", "content": "Finding flights"}]}}),
            json!({"__interrupt__": [{"value": "Approve?"}]}),
        ]))
        .with_resume_script(ok_script(vec![
            // The resumed run replays state containing the same message id.
            json!({"flight_assistant": {"messages": [
                {"id": "m1", "type": "ai", "content": "Finding flights"},
                {"id": "m2", "type": "ai", "content": "Flight booked"}
            ]}}),
        ])),
    );
    let session = Session::from_arc(Arc::clone(&runtime), SessionConfig::new("thread-2"))
        .with_resume_policy(ResumePolicy::Auto(ResumeCommand::Approve));

    let stream = session.stream(RunInput::from_user("book it")).await.unwrap();
    let emissions = drain(stream).await;

    assert_eq!(
        emissions,
        vec![
            Emission::Text("Finding flights".to_string()),
            Emission::Interrupt("Approve?".to_string()),
            Emission::Text("Flight booked".to_string()),
        ]
    );
}

#[tokio::test]
async fn edit_resume_command_carries_arguments() {
    let runtime = Arc::new(
        ScriptedRuntime::new(ok_script(vec![
            json!({"__interrupt__": [{"value": "Approve or edit?"}]}),
        ]))
        .with_resume_script(ok_script(vec![])),
    );
    let session = Session::from_arc(Arc::clone(&runtime), SessionConfig::new("thread-3"));

    let stream = session.stream(RunInput::from_user("book")).await.unwrap();
    drain(stream).await;

    let mut args = serde_json::Map::new();
    args.insert("hotel_name".to_string(), json!("Grand Hotel"));
    let resumed = session
        .resume(ResumeCommand::Edit { args: args.clone() })
        .await
        .unwrap();
    drain(resumed).await;

    assert_eq!(
        *runtime.resume_commands.lock().unwrap(),
        vec![ResumeCommand::Edit { args }]
    );
}

#[tokio::test]
async fn mid_stream_errors_propagate_after_earlier_emissions() {
    let runtime = ScriptedRuntime::new(vec![
        Ok(json!({"agent": {"messages": [{"content": "partial"}]}})),
        Err(ConciergeError::Runtime("model overloaded".to_string())),
    ]);
    let session = Session::new(runtime, SessionConfig::new("thread-4"));

    let mut stream = session.stream(RunInput::from_user("hi")).await.unwrap();

    // Consumers accumulate text and substitute a generic apology on error.
    let mut transcript = ChatMessage::assistant("");
    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(first, Emission::Text("partial".to_string()));
    transcript.append(first.text());

    let error = stream.next().await.unwrap().unwrap_err();
    assert!(error.is_runtime());
    transcript.append(ERROR_FALLBACK);
    assert_eq!(
        transcript.content,
        "partialSorry, something went wrong. Please try again."
    );
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn start_failure_surfaces_as_error() {
    let session = Session::new(ScriptedRuntime::failing(), SessionConfig::new("thread-5"));
    let error = session
        .stream(RunInput::from_user("hi"))
        .await
        .err()
        .expect("start should fail");
    assert!(matches!(error, ConciergeError::Runtime(_)));
}

#[tokio::test]
async fn run_input_and_session_config_reach_the_runtime() {
    let runtime = Arc::new(ScriptedRuntime::new(ok_script(vec![])));
    let config = SessionConfig::new("thread-6")
        .with_user_name("Joe")
        .with_recursion_limit(7);
    let session = Session::from_arc(Arc::clone(&runtime), config.clone());

    let input = RunInput::from_user("plan a trip")
        .with_system("You are a helpful assistant that can help me book a hotel. Your name is Joe.");
    drain(session.stream(input.clone()).await.unwrap()).await;

    assert_eq!(*runtime.inputs.lock().unwrap(), vec![input]);
    assert_eq!(session.config(), &config);
}
