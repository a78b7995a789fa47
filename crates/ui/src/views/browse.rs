use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::filter::BrowseFilter;
use quiz_core::model::QuestionId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::map_browse;

#[component]
pub fn BrowseView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let dataset = ctx.dataset();
    let quiz = ctx.quiz();
    let mut search = use_signal(String::new);
    let mut structure = use_signal(String::new);
    let mut view_tag = use_signal(String::new);

    // The table is recomputed on every keystroke; the dataset is immutable
    // and small enough that no caching is needed.
    let filter = BrowseFilter {
        structure: Some(structure()).filter(|s| !s.is_empty()),
        view: Some(view_tag()).filter(|v| !v.is_empty()),
        search: search(),
    };
    let vm = map_browse(&dataset, &filter);

    let structure_options = vm.structures.iter().map(|tag| {
        rsx! {
            option { value: "{tag}", selected: structure() == *tag, "{tag}" }
        }
    });
    let view_options = vm.views.iter().map(|tag| {
        rsx! {
            option { value: "{tag}", selected: view_tag() == *tag, "{tag}" }
        }
    });

    let rows = vm.rows.iter().map(|row| {
        let nav = navigator;
        let quiz = quiz.clone();
        let id = row.id.clone();
        rsx! {
            tr {
                td { class: "browse-id", "{row.id}" }
                td { class: "browse-question", "{row.question}" }
                td { "{row.structure}" }
                td { "{row.view}" }
                td {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let quiz = quiz.clone();
                            let id = QuestionId::new(id.as_str());
                            spawn(async move {
                                let mut service = quiz.lock().await;
                                // Ids come from the dataset, so lookup cannot fail.
                                if service.open_item(&id).is_ok() {
                                    let _ = nav.push(Route::Quiz {});
                                }
                            });
                        },
                        "Open"
                    }
                }
            }
        }
    });

    rsx! {
        div { class: "page browse-page",
            header { class: "view-header",
                h2 { class: "view-title", "Browse" }
            }
            div { class: "browse-filters",
                input {
                    class: "browse-search",
                    r#type: "text",
                    placeholder: "Search questions...",
                    value: "{search()}",
                    oninput: move |evt| search.set(evt.value()),
                }
                select {
                    class: "browse-select",
                    onchange: move |evt| structure.set(evt.value()),
                    option { value: "", "All structures" }
                    {structure_options}
                }
                select {
                    class: "browse-select",
                    onchange: move |evt| view_tag.set(evt.value()),
                    option { value: "", "All views" }
                    {view_options}
                }
            }
            p { class: "browse-count", "{vm.count_label}" }
            if vm.rows.is_empty() {
                p { class: "browse-empty", "No questions match." }
            } else {
                table { class: "browse-table",
                    thead {
                        tr {
                            th { "Id" }
                            th { "Question" }
                            th { "Structure" }
                            th { "View" }
                            th { "" }
                        }
                    }
                    tbody { {rows} }
                }
            }
        }
    }
}
