use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{GroupRowVm, map_stats};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResetState {
    Idle,
    Confirming,
    Resetting,
    Error(ViewError),
}

fn group_table(title: &str, rows: &[GroupRowVm]) -> Element {
    let body = rows.iter().map(|row| {
        rsx! {
            tr {
                td { "{row.key}" }
                td { "{row.answered_label}" }
                td { class: "stats-accuracy", "{row.accuracy_label}" }
            }
        }
    });
    rsx! {
        div { class: "stats-group",
            h3 { "{title}" }
            table { class: "stats-table",
                thead {
                    tr {
                        th { "Group" }
                        th { "Answered" }
                        th { "Accuracy" }
                    }
                }
                tbody { {body} }
            }
        }
    }
}

#[component]
pub fn StatsView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut reset_state = use_signal(|| ResetState::Idle);

    let stats_for_resource = ctx.stats();
    let resource = use_resource(move || {
        let stats = stats_for_resource.clone();
        async move {
            let report = stats.report().await;
            Ok::<_, ViewError>(map_stats(&report))
        }
    });
    let state = view_state_from_resource(resource);
    let quiz_for_reset = ctx.quiz();

    rsx! {
        div { class: "page stats-page",
            header { class: "view-header",
                h2 { class: "view-title", "Stats" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(vm) => rsx! {
                    div { class: "stats-summary",
                        div { class: "stats-tile",
                            span { class: "stats-value", "{vm.total_label}" }
                            span { class: "stats-label", "Questions" }
                        }
                        div { class: "stats-tile",
                            span { class: "stats-value", "{vm.answered_label}" }
                            span { class: "stats-label", "Answered" }
                        }
                        div { class: "stats-tile",
                            span { class: "stats-value", "{vm.correct_label}" }
                            span { class: "stats-label", "Correct" }
                        }
                        div { class: "stats-tile",
                            span { class: "stats-value", "{vm.incorrect_label}" }
                            span { class: "stats-label", "Incorrect" }
                        }
                        div { class: "stats-tile",
                            span { class: "stats-value", "{vm.accuracy_label}" }
                            span { class: "stats-label", "Accuracy" }
                        }
                    }
                    div { class: "stats-progress",
                        div {
                            class: "stats-progress-fill",
                            style: "width: {vm.progress_percent}%",
                        }
                    }
                    {group_table("By structure", &vm.by_structure)}
                    {group_table("By view", &vm.by_view)}

                    div { class: "stats-reset",
                        if let ResetState::Error(err) = reset_state() {
                            p { class: "banner banner-error", "{err.message()}" }
                        }
                        // Irreversible, so the first click only arms the action.
                        match reset_state() {
                            ResetState::Confirming | ResetState::Resetting => rsx! {
                                p { class: "stats-reset-warning",
                                    "This permanently clears all recorded answers."
                                }
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    onclick: move |_| reset_state.set(ResetState::Idle),
                                    "Cancel"
                                }
                                button {
                                    class: "btn btn-danger",
                                    r#type: "button",
                                    disabled: reset_state() == ResetState::Resetting,
                                    onclick: move |_| {
                                        let quiz = quiz_for_reset.clone();
                                        let mut resource = resource;
                                        spawn(async move {
                                            reset_state.set(ResetState::Resetting);
                                            let mut service = quiz.lock().await;
                                            match service.reset_progress().await {
                                                Ok(()) => {
                                                    reset_state.set(ResetState::Idle);
                                                    resource.restart();
                                                }
                                                Err(_) => {
                                                    reset_state.set(ResetState::Error(ViewError::Unknown));
                                                }
                                            }
                                        });
                                    },
                                    "Yes, reset everything"
                                }
                            },
                            _ => rsx! {
                                button {
                                    class: "btn btn-danger",
                                    r#type: "button",
                                    onclick: move |_| reset_state.set(ResetState::Confirming),
                                    "Reset progress"
                                }
                            },
                        }
                    }
                },
            }
        }
    }
}
