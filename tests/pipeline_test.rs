// tests/pipeline_test.rs — Integration test: question pipeline with scripted completions

mod common;

use std::sync::Arc;

use common::{RecordingSink, ScriptedCompletion, BOXED_FOUR};
use pretty_assertions::assert_eq;
use synapse::core::{ChosenAnswer, Pipeline, PipelineOptions, PipelineResult, Question};

fn run_setup(
    replies: &[&str],
    options: PipelineOptions,
) -> (Pipeline, Arc<ScriptedCompletion>, Arc<RecordingSink>) {
    let completion = Arc::new(ScriptedCompletion::new(replies));
    let sink = Arc::new(RecordingSink::default());
    let pipeline = Pipeline::new(completion.clone(), sink.clone(), options).unwrap();
    (pipeline, completion, sink)
}

async fn submit(replies: &[&str], question: &str) -> PipelineResult {
    let (pipeline, _, _) = run_setup(replies, PipelineOptions::default());
    pipeline
        .submit(&Question::parse(question).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_missing_marker_needs_edit() {
    for reply in [
        "The question is clear.",
        "FINAL DECISION: YES",
        "final_decision: yes",
        "",
    ] {
        let result = submit(&[reply], "What is 2+2?").await;
        assert_eq!(
            result,
            PipelineResult::NeedsEdit {
                feedback: reply.to_string()
            },
            "reply {reply:?} should fail closed"
        );
    }
}

#[tokio::test]
async fn test_both_markers_needs_edit() {
    let reply = "Initially FINAL_DECISION: YES, but mass is missing.\nFINAL_DECISION: NO";
    let result = submit(&[reply], "How fast does it fall?").await;
    assert_eq!(
        result,
        PipelineResult::NeedsEdit {
            feedback: reply.into()
        }
    );
}

#[tokio::test]
async fn test_rejection_stops_after_one_call() {
    let (pipeline, completion, sink) =
        run_setup(&["Ambiguous.\nFINAL_DECISION: NO"], PipelineOptions::default());
    let q = Question::parse("Find x.").unwrap();
    pipeline.submit(&q).await.unwrap();

    assert_eq!(completion.calls(), 1);
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].question, "Find x.");
    assert_eq!(
        records[0].ambiguity_feedback.as_deref(),
        Some("Ambiguous.\nFINAL_DECISION: NO")
    );
    assert!(records[0].answers.is_empty());
}

#[tokio::test]
async fn test_whitespace_question_reaches_gate_and_is_logged() {
    let (pipeline, completion, sink) =
        run_setup(&["vague FINAL_DECISION: NO"], PipelineOptions::default());
    let result = pipeline.submit(&Question::parse(" ").unwrap()).await.unwrap();

    assert_eq!(
        result,
        PipelineResult::NeedsEdit {
            feedback: "vague FINAL_DECISION: NO".into()
        }
    );
    assert_eq!(completion.calls(), 1);
    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].question, " ");
}

#[tokio::test]
async fn test_normalized_match_skips_arbitration() {
    let first = "Final Answer:\n$$\\boxed{4}$$";
    let second = "final answer: $$\\BOXED{4}$$\n";
    let (pipeline, completion, sink) = run_setup(
        &["FINAL_DECISION: YES", first, second],
        PipelineOptions::default(),
    );
    let result = pipeline
        .submit(&Question::parse("What is 2+2?").unwrap())
        .await
        .unwrap();

    match result {
        PipelineResult::Answered {
            final_answer,
            answers,
            arbitration,
        } => {
            assert_eq!(final_answer, first);
            assert_eq!(answers[0].text, first);
            assert_eq!(answers[1].text, second);
            assert_eq!(answers[0].model_label, "gemini-1");
            assert_eq!(answers[1].model_label, "gemini-2");
            assert!(arbitration.is_none());
        }
        other => panic!("expected answer, got {other:?}"),
    }
    assert_eq!(completion.calls(), 3);

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].answers.len(), 2);
    assert!(records[0].arbitration.is_none());
    assert!(records[0].ambiguity_feedback.is_none());
}

#[tokio::test]
async fn test_arbiter_reply_with_one_picks_first() {
    let (pipeline, completion, sink) = run_setup(
        &[
            "FINAL_DECISION: YES",
            "$$\\boxed{4}$$",
            "$$\\boxed{5}$$",
            "Answer 1 is correct because 2+2=4.",
        ],
        PipelineOptions::default(),
    );
    let result = pipeline
        .submit(&Question::parse("What is 2+2?").unwrap())
        .await
        .unwrap();

    match result {
        PipelineResult::Answered {
            final_answer,
            arbitration,
            ..
        } => {
            let arbitration = arbitration.expect("arbitration expected");
            assert_eq!(arbitration.chosen, ChosenAnswer::First);
            assert_eq!(arbitration.reason, "Answer 1 is correct because 2+2=4.");
            assert_eq!(final_answer, "$$\\boxed{4}$$");
        }
        other => panic!("expected answer, got {other:?}"),
    }

    // The arbiter sees the question and both answers in order.
    let prompts = completion.prompts();
    assert_eq!(prompts.len(), 4);
    assert!(prompts[3].contains("Given the question: What is 2+2?"));
    assert!(prompts[3].contains("1. $$\\boxed{4}$$\n2. $$\\boxed{5}$$"));

    let records = sink.records();
    assert_eq!(
        records[0].arbitration.as_ref().map(|a| a.chosen),
        Some(ChosenAnswer::First)
    );
}

#[tokio::test]
async fn test_arbiter_reply_without_one_picks_second() {
    for reply in ["2", "The second answer is right.", "Neither is great.", ""] {
        let result = submit(
            &["FINAL_DECISION: YES", "x = 3", "x = 4", reply],
            "Solve x + 2 = 6",
        )
        .await;
        match result {
            PipelineResult::Answered {
                final_answer,
                arbitration,
                ..
            } => {
                assert_eq!(
                    arbitration.map(|a| a.chosen),
                    Some(ChosenAnswer::Second),
                    "reply {reply:?}"
                );
                assert_eq!(final_answer, "x = 4");
            }
            other => panic!("expected answer, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_prompts_carry_question() {
    let (pipeline, completion, _) = run_setup(
        &["FINAL_DECISION: YES", BOXED_FOUR, BOXED_FOUR],
        PipelineOptions::default(),
    );
    pipeline
        .submit(&Question::parse("What is 2+2?").unwrap())
        .await
        .unwrap();

    let prompts = completion.prompts();
    assert!(prompts[0].contains("FINAL_DECISION: YES"));
    assert!(prompts[0].ends_with("Question: What is 2+2?"));
    // Both answer requests use the identical template.
    assert_eq!(prompts[1], prompts[2]);
    assert!(prompts[1].contains("Final Answer:"));
}

#[tokio::test]
async fn test_resubmission_is_structurally_identical() {
    let replies = [
        "FINAL_DECISION: YES",
        "v = 9.8 m/s",
        "v = 9.81 m/s",
        "Answer 2 uses the standard value of g.",
    ];
    let first = submit(&replies, "Speed after 1 s of free fall?").await;
    let second = submit(&replies, "Speed after 1 s of free fall?").await;
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[tokio::test]
async fn test_parallel_answers_keep_order() {
    let replies = ["FINAL_DECISION: YES", "x = 1", "x = 2", "Pick 2"];
    let (sequential, _, _) = run_setup(&replies, PipelineOptions::default());
    let (parallel, _, _) = run_setup(
        &replies,
        PipelineOptions {
            parallel_answers: true,
        },
    );
    let q = Question::parse("Solve 2x = 2").unwrap();

    let a = sequential.submit(&q).await.unwrap();
    let b = parallel.submit(&q).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_gate_failure_is_fatal_and_unlogged() {
    let completion = Arc::new(ScriptedCompletion::new(&[]).then_fail(503));
    let sink = Arc::new(RecordingSink::default());
    let pipeline = Pipeline::new(completion, sink.clone(), PipelineOptions::default()).unwrap();

    let err = pipeline
        .submit(&Question::parse("What is 2+2?").unwrap())
        .await
        .unwrap_err();
    assert!(err.is_completion_failure());
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn test_arbitration_failure_is_fatal_and_unlogged() {
    let completion = Arc::new(
        ScriptedCompletion::new(&["FINAL_DECISION: YES", "a", "b"]).then_fail(500),
    );
    let sink = Arc::new(RecordingSink::default());
    let pipeline = Pipeline::new(completion.clone(), sink.clone(), PipelineOptions::default())
        .unwrap();

    let err = pipeline
        .submit(&Question::parse("Pick a or b").unwrap())
        .await
        .unwrap_err();
    assert!(err.is_completion_failure());
    assert_eq!(completion.calls(), 4);
    assert!(sink.records().is_empty());
}

#[tokio::test]
async fn test_failing_log_keeps_answer() {
    let completion = Arc::new(ScriptedCompletion::new(&[
        "FINAL_DECISION: YES",
        BOXED_FOUR,
        BOXED_FOUR,
    ]));
    let pipeline = Pipeline::new(
        completion,
        Arc::new(RecordingSink::failing()),
        PipelineOptions::default(),
    )
    .unwrap();

    let result = pipeline
        .submit(&Question::parse("What is 2+2?").unwrap())
        .await
        .unwrap();
    assert!(result.is_answered());
}
