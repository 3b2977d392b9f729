use dioxus::prelude::*;

use crate::vm::{PromptVm, SessionIntent};

/// Confidence capture after an answer is picked. Clicking the backdrop
/// dismisses it without recording anything.
#[component]
pub fn ConfidenceModal(prompt: PromptVm, on_intent: EventHandler<SessionIntent>) -> Element {
    rsx! {
        div {
            class: "confidence-overlay",
            onclick: move |_| on_intent.call(SessionIntent::DismissPrompt),
            div {
                class: "confidence-modal",
                role: "dialog",
                aria_modal: "true",
                aria_labelledby: "confidence-title",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "confidence-modal__title", id: "confidence-title", "{prompt.question}" }
                p { class: "confidence-modal__selection", "{prompt.selection_line}" }
                div { class: "confidence-modal__actions",
                    button {
                        class: "btn confidence-modal__sure",
                        id: "confidence-sure",
                        r#type: "button",
                        onclick: move |_| on_intent.call(SessionIntent::Confidence(true)),
                        "{prompt.sure_label}"
                    }
                    button {
                        class: "btn btn-secondary confidence-modal__not-sure",
                        id: "confidence-not-sure",
                        r#type: "button",
                        onclick: move |_| on_intent.call(SessionIntent::Confidence(false)),
                        "{prompt.not_sure_label}"
                    }
                }
            }
        }
    }
}
