//! Tests for the stream classifier/aggregator.

use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;

use concierge::aggregate::{aggregate, collect_text, Aggregator, Emission, SessionPhase};

fn chunk_stream(chunks: Vec<serde_json::Value>) -> concierge::runtime::ChunkStream {
    Box::pin(tokio_stream::iter(chunks.into_iter().map(Ok)))
}

async fn emissions_of(chunks: Vec<serde_json::Value>) -> Vec<Emission> {
    aggregate(chunk_stream(chunks))
        .map(|item| item.unwrap())
        .collect()
        .await
}

#[tokio::test]
async fn agent_then_tools_chunks_emit_in_arrival_order() {
    let emissions = emissions_of(vec![
        json!({"agent": {"messages": [{"content": "Hi"}]}}),
        json!({"tools": {"messages": [{"content": "Tool did X"}]}}),
    ])
    .await;

    assert_eq!(
        emissions,
        vec![
            Emission::Text("Hi".to_string()),
            Emission::ToolOutput {
                text: "Tool did X".to_string(),
                is_error: false,
            },
        ]
    );
}

#[tokio::test]
async fn duplicate_message_ids_across_channels_emit_once() {
    let emissions = emissions_of(vec![
        json!({"flight_assistant": {"messages": [
            {"id": "m1", "type": "ai", "content": "Transferring you to hotels"}
        ]}}),
        json!({"hotel_assistant": {"messages": [
            {"id": "m1", "type": "ai", "content": "Transferring you to hotels"}
        ]}}),
    ])
    .await;

    assert_eq!(
        emissions,
        vec![Emission::Text("Transferring you to hotels".to_string())]
    );
}

#[tokio::test]
async fn typed_blocks_emit_text_and_suppress_tool_use() {
    let emissions = emissions_of(vec![json!({"hotel_assistant": {"messages": [{
        "id": "m2",
        "type": "ai",
        "content": [
            {"type": "text", "text": "Let me book that."},
            {"type": "tool_use", "id": "call-1", "name": "book_hotel", "input": {"hotel_name": "Ritz"}},
            {"type": "text", "text": "Done."}
        ]
    }]}})])
    .await;

    assert_eq!(
        emissions,
        vec![
            Emission::Text("Let me book that.".to_string()),
            Emission::Text("Done.".to_string()),
        ]
    );
}

#[tokio::test]
async fn non_assistant_messages_are_skipped_in_sub_agent_channels() {
    let emissions = emissions_of(vec![json!({"flight_assistant": {"messages": [
        {"id": "t1", "type": "tool", "content": "raw tool output"},
        {"id": "a1", "type": "ai", "content": "Your flight is booked"}
    ]}})])
    .await;

    assert_eq!(
        emissions,
        vec![Emission::Text("Your flight is booked".to_string())]
    );
}

#[tokio::test]
async fn replayed_human_messages_are_not_echoed_by_supervisor_channels() {
    // Supervisor chunks replay the whole thread state, starting with the
    // original user request.
    let emissions = emissions_of(vec![json!({"supervisor": {"messages": [
        {"id": "h1", "type": "human", "content": "Book me a flight to Paris"},
        {"id": "a1", "type": "ai", "content": "I'll hand this to the flight assistant."}
    ]}})])
    .await;

    assert_eq!(
        emissions,
        vec![Emission::Text(
            "I'll hand this to the flight assistant.".to_string()
        )]
    );
}

#[tokio::test]
async fn empty_content_produces_no_emission() {
    let emissions = emissions_of(vec![
        json!({"agent": {"messages": [{"content": ""}]}}),
        json!({"agent": {"messages": []}}),
        json!({"tools": {"messages": [{"content": []}]}}),
    ])
    .await;

    assert_eq!(emissions, Vec::<Emission>::new());
}

#[tokio::test]
async fn unknown_chunk_shapes_are_silently_ignored() {
    let emissions = emissions_of(vec![
        json!(42),
        json!({"metrics": {"tokens": 12}}),
        json!({"agent": {"messages": [{"content": "still fine"}]}}),
    ])
    .await;

    assert_eq!(emissions, vec![Emission::Text("still fine".to_string())]);
}

#[tokio::test]
async fn intermediate_steps_and_generated_text_are_narrated() {
    let emissions = emissions_of(vec![
        json!({"generated": "deciding which tool to call"}),
        json!({"intermediate_steps": [{
            "action": {"tool": "getWeather", "toolInput": "London"},
            "observation": "It's always sunny in London!"
        }]}),
    ])
    .await;

    assert_eq!(
        emissions,
        vec![
            Emission::Text("Thinking: deciding which tool to call".to_string()),
            Emission::Text("Using tool: getWeather with input: London".to_string()),
            Emission::Text("Tool result: It's always sunny in London!".to_string()),
        ]
    );
}

#[tokio::test]
async fn structured_tool_input_renders_as_compact_json() {
    let emissions = emissions_of(vec![json!({"intermediate_steps": [{
        "action": {"tool": "bookHotel", "toolInput": {"hotel_name": "Ritz"}}
    }]})])
    .await;

    assert_eq!(
        emissions,
        vec![Emission::Text(
            r#"Using tool: bookHotel with input: {"hotel_name":"Ritz"}"#.to_string()
        )]
    );
}

#[tokio::test]
async fn interrupt_emits_prompt_then_stops_the_stream() {
    let emissions = emissions_of(vec![
        json!({"agent": {"messages": [{"content": "Checking the hotel"}]}}),
        json!({"__interrupt__": [{"value": "Approve booking?"}]}),
        // Never reached: the stream pauses before pulling this chunk.
        json!({"agent": {"messages": [{"content": "ghost"}]}}),
    ])
    .await;

    assert_eq!(
        emissions,
        vec![
            Emission::Text("Checking the hotel".to_string()),
            Emission::Interrupt("Approve booking?".to_string()),
        ]
    );
}

#[tokio::test]
async fn tool_errors_are_tagged_distinctly() {
    let emissions = emissions_of(vec![json!({"tools": {"messages": [
        {"id": "t1", "type": "tool", "content": "Error: Invalid date format. Please use YYYY-MM-DD format", "is_error": true},
        {"id": "t2", "type": "tool", "content": "Hotel booked for arrival on 2025-06-15"}
    ]}})])
    .await;

    assert_eq!(
        emissions,
        vec![
            Emission::ToolOutput {
                text: "Error: Invalid date format. Please use YYYY-MM-DD format".to_string(),
                is_error: true,
            },
            Emission::ToolOutput {
                text: "Hotel booked for arrival on 2025-06-15".to_string(),
                is_error: false,
            },
        ]
    );
}

#[test]
fn aggregator_drops_updates_while_paused_and_resumes() {
    let mut aggregator = Aggregator::new();

    let first = aggregator.apply_chunk(&json!({"__interrupt__": [{"value": "Approve?"}]}));
    assert_eq!(first, vec![Emission::Interrupt("Approve?".to_string())]);
    assert_eq!(aggregator.phase(), SessionPhase::Paused);

    let while_paused =
        aggregator.apply_chunk(&json!({"agent": {"messages": [{"content": "dropped"}]}}));
    assert_eq!(while_paused, Vec::<Emission>::new());

    aggregator.resume();
    assert_eq!(aggregator.phase(), SessionPhase::Running);
    let after = aggregator.apply_chunk(&json!({"agent": {"messages": [{"content": "kept"}]}}));
    assert_eq!(after, vec![Emission::Text("kept".to_string())]);
}

#[test]
fn interrupt_takes_priority_within_a_single_chunk() {
    let mut aggregator = Aggregator::new();
    let emissions = aggregator.apply_chunk(&json!({
        "agent": {"messages": [{"content": "about to call tool"}]},
        "__interrupt__": [{"value": "Approve booking?"}]
    }));

    // Interrupt classifies first; the rest of the chunk is dropped by the
    // paused state.
    assert_eq!(
        emissions,
        vec![Emission::Interrupt("Approve booking?".to_string())]
    );
}

#[tokio::test]
async fn collect_text_joins_all_segments() {
    let stream = aggregate(chunk_stream(vec![
        json!({"agent": {"messages": [{"content": "Hi"}]}}),
        json!({"tools": {"messages": [{"content": " there"}]}}),
    ]));

    assert_eq!(collect_text(stream).await.unwrap(), "Hi there");
}
