use crate::storage::Scores;
use crate::utils::href;
use crate::widgets::{NamedScoreList, ScoreList};
use rockhound_core::Route;
use yew::prelude::*;

#[function_component]
pub(crate) fn HomeView() -> Html {
    let scores = Scores::default();
    let tool_shed = scores.tool_shed_scores();
    let shop = scores.named_scores();

    html! {
        <section class="home">
            <h1>{"Rockhound"}</h1>
            <p>{"Dig for minerals, test them with field tools, and learn to name what you find."}</p>
            <nav class="modes">
                <a class="mode" href={href(&Route::ToolShed { mineral: None })}>
                    <h2>{"Tool Shed"}</h2>
                    <p>{"Ten specimens. Use as few tools as you can before naming each one."}</p>
                </a>
                <a class="mode" href={href(&Route::Shop)}>
                    <h2>{"Mining Shop"}</h2>
                    <p>{"Pick a mine, spend your battery digging, and sell what you identify."}</p>
                </a>
                <a class="mode" href={href(&Route::Reference)}>
                    <h2>{"Reference"}</h2>
                    <p>{"Browse every mineral and its properties."}</p>
                </a>
            </nav>
            <div class="high-scores">
                <article>
                    <h3>{"Tool Shed"}</h3>
                    <ScoreList scores={tool_shed}/>
                </article>
                <article>
                    <h3>{"Mining Shop"}</h3>
                    <NamedScoreList scores={shop}/>
                </article>
            </div>
        </section>
    }
}
