use rockhound_core::{Catalog, Mineral, NamedScore, Tool};
use std::collections::BTreeSet;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Autocomplete entries shown under a guess box.
pub(crate) const SUGGESTION_LIMIT: usize = 6;

#[derive(Properties, PartialEq)]
pub(crate) struct ToolPanelProps {
    pub mineral: Mineral,
    pub revealed: BTreeSet<Tool>,
    #[prop_or_default]
    pub disabled: bool,
    pub on_reveal: Callback<Tool>,
}

#[function_component]
pub(crate) fn ToolPanel(props: &ToolPanelProps) -> Html {
    html! {
        <ul class="tools">
            {
                for Tool::ALL.into_iter().map(|tool| {
                    let revealed = props.revealed.contains(&tool);
                    let onclick = {
                        let on_reveal = props.on_reveal.clone();
                        Callback::from(move |_| on_reveal.emit(tool))
                    };
                    html! {
                        <li class={classes!("tool", tool.id(), revealed.then_some("used"))}>
                            <button
                                {onclick}
                                title={tool.prompt()}
                                disabled={props.disabled || revealed}
                            >
                                {tool.label()}
                            </button>
                            if revealed {
                                <output>{tool.readout(&props.mineral)}</output>
                            }
                        </li>
                    }
                })
            }
        </ul>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct GuessFormProps {
    pub catalog: Rc<Catalog>,
    /// Characters typed before suggestions appear.
    pub min_len: usize,
    #[prop_or_default]
    pub disabled: bool,
    pub on_guess: Callback<String>,
}

#[function_component]
pub(crate) fn GuessForm(props: &GuessFormProps) -> Html {
    let text = use_state(String::new);

    let oninput = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };

    let onsubmit = {
        let text = text.clone();
        let on_guess = props.on_guess.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_guess.emit((*text).clone());
            text.set(String::new());
        })
    };

    let suggestions = props
        .catalog
        .suggestions(&text, props.min_len, SUGGESTION_LIMIT);

    html! {
        <form class="guess" {onsubmit}>
            <input
                type="text"
                placeholder="Name this mineral..."
                autocomplete="off"
                value={(*text).clone()}
                {oninput}
                disabled={props.disabled}
            />
            <button type="submit" disabled={props.disabled}>{"Guess"}</button>
            if !suggestions.is_empty() && !props.disabled {
                <ul class="suggestions">
                    {
                        for suggestions.into_iter().map(|name| {
                            let onclick = {
                                let text = text.clone();
                                let name = name.to_string();
                                Callback::from(move |_| text.set(name.clone()))
                            };
                            html! { <li {onclick}>{name}</li> }
                        })
                    }
                </ul>
            }
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct BatteryProps {
    pub battery: u16,
    pub max: u16,
    pub low: bool,
}

#[function_component]
pub(crate) fn BatteryMeter(props: &BatteryProps) -> Html {
    let percent = if props.max == 0 {
        0
    } else {
        u32::from(props.battery) * 100 / u32::from(props.max)
    };
    html! {
        <div class={classes!("battery", props.low.then_some("low"))}>
            <span class="level" style={format!("width: {percent}%")}/>
            <span class="label">{format!("{}/{}", props.battery, props.max)}</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ScoreListProps {
    pub scores: Vec<u32>,
}

#[function_component]
pub(crate) fn ScoreList(props: &ScoreListProps) -> Html {
    if props.scores.is_empty() {
        return html! { <p class="muted">{"No scores yet."}</p> };
    }
    html! {
        <ol class="scores">
            { for props.scores.iter().map(|score| html! { <li>{*score}</li> }) }
        </ol>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct NamedScoreListProps {
    pub scores: Vec<NamedScore>,
}

#[function_component]
pub(crate) fn NamedScoreList(props: &NamedScoreListProps) -> Html {
    if props.scores.is_empty() {
        return html! { <p class="muted">{"No scores yet."}</p> };
    }
    html! {
        <ol class="scores">
            {
                for props.scores.iter().map(|entry| html! {
                    <li><span>{entry.name.clone()}</span>{" "}<strong>{entry.score}</strong></li>
                })
            }
        </ol>
    }
}
