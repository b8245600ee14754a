use crate::storage::Scores;
use crate::utils::*;
use crate::widgets::*;
use rockhound_core::*;
use std::rc::Rc;
use yew::prelude::*;

/// Characters typed before the Tool Shed guess box suggests names.
const SUGGEST_AFTER: usize = 2;

pub(crate) enum Msg {
    Reveal(Tool),
    Guess(String),
    Skip,
    Next,
    Restart,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct ToolShedProps {
    pub catalog: Rc<Catalog>,
    pub seed: u64,
    /// Mineral for the first round, from a "practice this mineral" link.
    #[prop_or_default]
    pub forced: Option<String>,
}

pub(crate) struct ToolShedView {
    session: Option<ToolShedSession>,
    rng: SmallRng,
    scores: Scores,
    last_outcome: Option<GuessOutcome>,
}

impl ToolShedView {
    fn apply(&mut self, ctx: &Context<Self>, msg: Msg) -> Result<bool> {
        let catalog = &ctx.props().catalog;
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };
        match msg {
            Msg::Reveal(tool) => session.reveal_tool(tool),
            Msg::Guess(guess) => {
                let outcome = session.guess(&guess, &mut self.rng)?;
                let updated = !matches!(outcome, GuessOutcome::Blank);
                self.last_outcome = Some(outcome);
                Ok(updated)
            }
            Msg::Skip => {
                session.skip()?;
                self.last_outcome = None;
                Ok(true)
            }
            Msg::Next => {
                let advance = session.next_round(catalog, &mut self.rng, &mut self.scores)?;
                log::debug!("advance: {:?}", advance);
                self.last_outcome = None;
                Ok(true)
            }
            Msg::Restart => {
                session.restart(catalog, &mut self.rng)?;
                self.last_outcome = None;
                Ok(true)
            }
        }
    }

    fn view_testing(&self, ctx: &Context<Self>, session: &ToolShedSession) -> Html {
        let identification = session.identification();
        let link = ctx.link();
        html! {
            <>
                <div class="specimen">
                    <Swatch mineral={session.target().clone()}/>
                    <p>{"Test this specimen, then name it."}</p>
                </div>
                <ToolPanel
                    mineral={session.target().clone()}
                    revealed={identification.tools().clone()}
                    on_reveal={link.callback(Msg::Reveal)}
                />
                <p class="attempts">
                    {format!("Guesses left: {}", identification.attempts_left())}
                </p>
                if let Some(hint) = self.last_outcome.as_ref().and_then(GuessOutcome::hint) {
                    <p class="hint">{hint.to_string()}</p>
                }
                <GuessForm
                    catalog={ctx.props().catalog.clone()}
                    min_len={SUGGEST_AFTER}
                    on_guess={link.callback(Msg::Guess)}
                />
                <button class="secondary" onclick={link.callback(|_| Msg::Skip)}>
                    {"Skip this mineral (0 points)"}
                </button>
            </>
        }
    }

    fn view_result(&self, ctx: &Context<Self>, session: &ToolShedSession) -> Html {
        let target = session.target();
        let score = session.last_round_score().unwrap_or_default();
        let next_label = if session.is_last_round() {
            "See Final Score".to_string()
        } else {
            format!("Next Mineral (Round {}/{}) →", session.round() + 1, session.rounds())
        };
        html! {
            <div class={classes!("round-result", (score > 0).then_some("correct"))}>
                <Swatch mineral={target.clone()}/>
                <h2>{target.name.clone()}</h2>
                if score > 0 {
                    <p>{format!(
                        "Correct! +{score} points with {} tool(s).",
                        session.identification().tools_used()
                    )}</p>
                } else {
                    <p>{format!("It was {}. No points this round.", target.name)}</p>
                }
                <p class="fun-fact">{target.fun_fact.clone()}</p>
                <button onclick={ctx.link().callback(|_| Msg::Next)}>{next_label}</button>
            </div>
        }
    }

    fn view_finished(&self, ctx: &Context<Self>, session: &ToolShedSession) -> Html {
        html! {
            <div class="session-complete">
                <h2>{"Session Complete!"}</h2>
                <div class="total">{session.total_score()}</div>
                <p>{format!(
                    "{}% efficiency · {}/{} correct",
                    session.efficiency(),
                    session.correct_count(),
                    session.rounds()
                )}</p>
                <ol class="rounds">
                    {
                        for session.round_scores().iter().enumerate().map(|(i, &score)| html! {
                            <li class={if score > 0 { "hit" } else { "miss" }}>
                                {format!("R{}: {score}", i + 1)}
                            </li>
                        })
                    }
                </ol>
                <h3>{"High Scores"}</h3>
                <ScoreList scores={self.scores.tool_shed_scores()}/>
                <button onclick={ctx.link().callback(|_| Msg::Restart)}>{"Play Again"}</button>
                <a href={href(&Route::Home)}>{"Home"}</a>
            </div>
        }
    }
}

impl Component for ToolShedView {
    type Message = Msg;
    type Properties = ToolShedProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut rng = seeded_rng(props.seed);
        let config = GameConfig::default();
        let session =
            match ToolShedSession::start(&props.catalog, props.forced.as_deref(), &config, &mut rng)
            {
                Ok(session) => Some(session),
                Err(err) => {
                    log::error!("Could not start tool shed session: {err}");
                    None
                }
            };
        Self {
            session,
            rng,
            scores: Scores::default(),
            last_outcome: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        self.apply(ctx, msg).unwrap_or_else(|err| {
            log::warn!("tool shed: {err}");
            false
        })
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Some(session) = &self.session else {
            return html! { <p class="error">{"No minerals to practise with."}</p> };
        };
        let progress = u32::from(session.round() - 1) * 100 / u32::from(session.rounds());
        html! {
            <section class="tool-shed">
                <nav class="round">
                    <span>{format!("Round {}/{}", session.round(), session.rounds())}</span>
                    <span>{format!("Score: {}", session.total_score())}</span>
                </nav>
                <div class="progress"><span style={format!("width: {progress}%")}/></div>
                {
                    match session.phase() {
                        SessionPhase::Testing => self.view_testing(ctx, session),
                        SessionPhase::Result => self.view_result(ctx, session),
                        SessionPhase::Finished => self.view_finished(ctx, session),
                    }
                }
            </section>
        }
    }
}
