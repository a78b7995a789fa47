use std::sync::Arc;

use quiz_core::model::{MediaSource, OptionLabel, QuestionId, QuestionRecord};
use quiz_core::time::fixed_clock;
use services::{QuizService, SequencePicker, StatsService};
use storage::repository::{InMemoryProgressStore, Storage};

fn record(id: u32, structure: &str) -> QuestionRecord {
    QuestionRecord {
        id: QuestionId::new(format!("q{id}")),
        question: format!("Question {id}?"),
        option_a: Some("Yes".into()),
        option_b: Some("No".into()),
        option_c: None,
        option_d: None,
        correct_option: OptionLabel::A,
        answer: "Yes.".into(),
        report: None,
        structure: Some(structure.into()),
        view: Some("a4c".into()),
        media: vec![MediaSource::parse(format!("videos/q{id}.mp4").as_str()).unwrap()],
    }
}

#[tokio::test]
async fn full_quiz_run_feeds_the_stats_report() {
    let (dataset, skipped) = quiz_core::model::Dataset::from_records(vec![
        record(1, "aorta"),
        record(2, "aorta"),
        record(3, "mitral valve"),
    ]);
    assert!(skipped.is_empty());
    let dataset = Arc::new(dataset);

    let storage = Storage::in_memory();
    let mut quiz = QuizService::new(Arc::clone(&dataset), Arc::clone(&storage.progress))
        .with_clock(fixed_clock())
        .with_picker(Box::new(SequencePicker::default()));
    let stats = StatsService::new(Arc::clone(&dataset), Arc::clone(&storage.progress));

    // Answer the whole bank: two right, one wrong.
    let mut answered = Vec::new();
    let mut wrong_done = false;
    while let Some(item) = quiz.next_question().await {
        answered.push(item.id().clone());
        let label = if wrong_done {
            OptionLabel::A
        } else {
            wrong_done = true;
            OptionLabel::B
        };
        quiz.submit_answer(label).await.unwrap();
    }
    assert!(quiz.is_exhausted());
    assert_eq!(answered.len(), 3);

    let report = stats.report().await;
    assert_eq!(report.total, 3);
    assert_eq!(report.answered, 3);
    assert_eq!(report.correct, 2);
    assert_eq!(report.incorrect, 1);
    assert_eq!(report.accuracy_percent, 67);

    // Re-answering a browsed item overwrites the stored outcome.
    quiz.open_item(&QuestionId::new("q1")).unwrap();
    quiz.submit_answer(OptionLabel::A).await.unwrap();
    let report = stats.report().await;
    assert_eq!(report.answered, 3);

    // Reset clears everything and makes the bank selectable again.
    quiz.reset_progress().await.unwrap();
    let report = stats.report().await;
    assert_eq!(report.answered, 0);
    assert!(quiz.next_question().await.is_some());
}

#[tokio::test]
async fn stats_group_rows_track_their_structures() {
    let (dataset, _) = quiz_core::model::Dataset::from_records(vec![
        record(1, "aorta"),
        record(2, "aorta"),
        record(3, "mitral valve"),
    ]);
    let dataset = Arc::new(dataset);

    let store = Arc::new(InMemoryProgressStore::new());
    let mut quiz = QuizService::new(Arc::clone(&dataset), store.clone())
        .with_clock(fixed_clock())
        .with_picker(Box::new(SequencePicker::default()));
    let stats = StatsService::new(Arc::clone(&dataset), store);

    quiz.open_item(&QuestionId::new("q1")).unwrap();
    quiz.submit_answer(OptionLabel::B).await.unwrap();

    let report = stats.report().await;
    let aorta = report
        .by_structure
        .iter()
        .find(|g| g.key == "aorta")
        .unwrap();
    assert_eq!(aorta.total, 2);
    assert_eq!(aorta.answered, 1);
    assert_eq!(aorta.accuracy_percent, Some(0));

    let mitral = report
        .by_structure
        .iter()
        .find(|g| g.key == "mitral valve")
        .unwrap();
    assert_eq!(mitral.answered, 0);
    assert_eq!(mitral.accuracy_percent, None);
}
