use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::session::SessionState;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{OptionState, QuizVm, snapshot_quiz};

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut vm = use_signal(|| QuizVm::Loading);
    let mut notice = use_signal(|| None::<String>);

    // Present a question on first mount. A session carried over from browse
    // (or a previous visit to this tab) is rendered as-is.
    let quiz_on_mount = ctx.quiz();
    use_future(move || {
        let quiz = quiz_on_mount.clone();
        async move {
            let mut service = quiz.lock().await;
            if matches!(service.state(), SessionState::Idle) {
                service.next_question().await;
            }
            vm.set(snapshot_quiz(&service));
        }
    });

    let quiz_for_options = ctx.quiz();
    let quiz_for_next = ctx.quiz();
    let dataset_error = ctx.dataset_error().map(str::to_owned);

    rsx! {
        div { class: "page quiz-page",
            header { class: "view-header",
                h2 { class: "view-title", "Quiz" }
            }
            if let Some(message) = dataset_error {
                p { class: "banner banner-error", "{message}" }
            }
            if let Some(message) = notice() {
                p { class: "banner banner-error", "{message}" }
            }
            match vm() {
                QuizVm::Loading => rsx! {
                    p { "Loading..." }
                },
                QuizVm::Empty => rsx! {
                    p { class: "quiz-empty", "No questions available." }
                },
                QuizVm::Completed { total } => rsx! {
                    div { class: "quiz-complete",
                        h3 { "All done!" }
                        p { "You have answered all {total} questions." }
                        Link { to: Route::Stats {}, "View your stats or reset your progress" }
                    }
                },
                QuizVm::Question(question) => {
                    let revealed = question.reveal.is_some();
                    let option_buttons = question.options.iter().map(|option| {
                        let label = option.label;
                        let text = option.text.clone();
                        let class = match option.state {
                            OptionState::Selectable => "option-btn",
                            OptionState::Correct => "option-btn option-btn--correct",
                            OptionState::Incorrect => "option-btn option-btn--incorrect",
                            OptionState::Dimmed => "option-btn option-btn--dimmed",
                        };
                        let quiz = quiz_for_options.clone();
                        rsx! {
                            button {
                                class: "{class}",
                                r#type: "button",
                                disabled: revealed,
                                onclick: move |_| {
                                    let quiz = quiz.clone();
                                    spawn(async move {
                                        let mut service = quiz.lock().await;
                                        match service.submit_answer(label).await {
                                            Ok(_) => notice.set(None),
                                            Err(err) => notice.set(Some(err.to_string())),
                                        }
                                        vm.set(snapshot_quiz(&service));
                                    });
                                },
                                span { class: "option-label", "{label}" }
                                span { class: "option-text", "{text}" }
                            }
                        }
                    });
                    rsx! {
                        div { class: "quiz-card",
                            if let Some(tags) = question.tag_line.clone() {
                                p { class: "quiz-tags", "{tags}" }
                            }
                            video {
                                class: "quiz-media",
                                src: "{question.media_src}",
                                controls: true,
                                autoplay: true,
                                muted: true,
                                r#loop: true,
                            }
                            p { class: "quiz-question", "{question.question}" }
                            div { class: "quiz-options", {option_buttons} }
                            if let Some(reveal) = question.reveal.clone() {
                                div {
                                    class: if reveal.was_correct {
                                        "quiz-reveal quiz-reveal--correct"
                                    } else {
                                        "quiz-reveal quiz-reveal--incorrect"
                                    },
                                    p { class: "quiz-verdict", "{reveal.verdict}" }
                                    p { class: "quiz-answer", "{reveal.answer_text}" }
                                    details { class: "quiz-report",
                                        summary { "Report" }
                                        p { "{reveal.report_text}" }
                                    }
                                }
                                button {
                                    class: "btn btn-primary quiz-next",
                                    r#type: "button",
                                    onclick: move |_| {
                                        let quiz = quiz_for_next.clone();
                                        spawn(async move {
                                            let mut service = quiz.lock().await;
                                            service.next_question().await;
                                            vm.set(snapshot_quiz(&service));
                                        });
                                    },
                                    "Next question"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
