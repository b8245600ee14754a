use crate::storage::Scores;
use crate::utils::*;
use crate::widgets::*;
use gloo::timers::callback::Timeout;
use rockhound_core::*;
use std::rc::Rc;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Characters typed before the identify prompt suggests names.
const SUGGEST_AFTER: usize = 1;

pub(crate) enum Msg {
    StartTrip(String),
    Dig(Coord2),
    Reveal(Tool),
    Guess(String),
    Collect,
    Leave,
    EndTrip,
    Scheduled(TripEvent),
    NameInput(String),
    SaveScore,
    NewTrip,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct ShopProps {
    pub catalog: Rc<Catalog>,
    pub seed: u64,
}

pub(crate) struct ShopView {
    trip: Option<MiningTrip>,
    rng: SmallRng,
    scores: Scores,
    last_outcome: Option<GuessOutcome>,
    name: String,
    score_saved: bool,
    /// Pending presentation delays, cancelled when the view goes away.
    timers: Timers<TripEvent>,
}

impl ShopView {
    fn apply(&mut self, ctx: &Context<Self>, msg: Msg) -> Result<bool> {
        let catalog = &ctx.props().catalog;
        match msg {
            Msg::StartTrip(location) => {
                let trip =
                    MiningTrip::start(catalog, &location, &GameConfig::default(), &mut self.rng)?;
                self.reset();
                self.trip = Some(trip);
                Ok(true)
            }
            Msg::NewTrip => {
                self.reset();
                Ok(self.trip.take().is_some())
            }
            Msg::NameInput(name) => {
                self.name = name;
                Ok(false)
            }
            Msg::SaveScore => {
                let payout = self.trip.as_ref().map_or(0, MiningTrip::payout);
                if !self.score_saved && self.scores.qualifies_for_named(payout) {
                    self.scores.save_named_score(&self.name, payout);
                    self.score_saved = true;
                }
                Ok(true)
            }
            msg => {
                let Some(trip) = self.trip.as_mut() else {
                    return Ok(false);
                };
                let updated = match msg {
                    Msg::Dig(coords) => {
                        let dug = trip.dig(coords)?;
                        if dug.reveal.has_update() {
                            self.last_outcome = None;
                        }
                        dug.reveal.has_update()
                    }
                    Msg::Reveal(tool) => trip.reveal_tool(tool)?,
                    Msg::Guess(guess) => {
                        let outcome = trip.guess(&guess, &mut self.rng)?;
                        let updated = !matches!(outcome, GuessOutcome::Blank);
                        self.last_outcome = Some(outcome);
                        updated
                    }
                    Msg::Collect => {
                        trip.collect_unidentified()?;
                        true
                    }
                    Msg::Leave => {
                        trip.leave()?;
                        true
                    }
                    Msg::EndTrip => {
                        trip.end_trip();
                        true
                    }
                    Msg::Scheduled(event) => {
                        self.timers.fired(&event);
                        trip.handle(event)
                    }
                    _ => false,
                };
                self.schedule(ctx);
                Ok(updated)
            }
        }
    }

    /// Hands the trip's delayed events to browser timers.
    fn schedule(&mut self, ctx: &Context<Self>) {
        let Some(trip) = self.trip.as_mut() else {
            return;
        };
        for Delayed { after_ms, event } in trip.take_scheduled() {
            let link = ctx.link().clone();
            let timeout = Timeout::new(after_ms, move || link.send_message(Msg::Scheduled(event)));
            self.timers.insert(event, timeout);
        }
    }

    fn reset(&mut self) {
        self.timers.clear();
        self.last_outcome = None;
        self.name.clear();
        self.score_saved = false;
    }

    fn view_locations(&self, ctx: &Context<Self>) -> Html {
        let catalog = &ctx.props().catalog;
        html! {
            <div class="locations">
                <h2>{"Choose a mine"}</h2>
                {
                    for catalog.locations().iter().map(|location| {
                        let id = location.id.clone();
                        let onclick = ctx.link().callback(move |_| Msg::StartTrip(id.clone()));
                        html! {
                            <article class={classes!("location", location.difficulty.name())}>
                                <h3>{location.name.clone()}</h3>
                                <p>{location.description.clone()}</p>
                                <p class="muted">{format!(
                                    "{} · {} battery charges · {} minerals",
                                    location.difficulty,
                                    location.starting_battery(),
                                    location.minerals.len()
                                )}</p>
                                <button {onclick}>{"Start digging"}</button>
                            </article>
                        }
                    })
                }
                <h3>{"High Scores"}</h3>
                <NamedScoreList scores={self.scores.named_scores()}/>
            </div>
        }
    }

    fn view_grid(&self, ctx: &Context<Self>, trip: &MiningTrip) -> Html {
        let locked = trip.is_finished()
            || trip
                .pending()
                .is_some_and(|find| !find.identification.is_resolved());
        html! {
            <table class={classes!("dig-site", (!locked).then_some("playable"))}>
                {
                    for trip.grid().rows().map(|row| html! {
                        <tr>
                            {
                                for row.map(|cell| {
                                    let coords = cell.coords();
                                    let onclick = ctx.link().callback(move |_| Msg::Dig(coords));
                                    match cell.visible_mineral() {
                                        Some(mineral) => html! {
                                            <td class="cell found">
                                                <Swatch mineral={mineral.clone()} sparkle={cell.is_animating()}/>
                                            </td>
                                        },
                                        None if cell.is_empty() => html! { <td class="cell empty"/> },
                                        None => html! { <td class="cell hidden" {onclick}/> },
                                    }
                                })
                            }
                        </tr>
                    })
                }
            </table>
        }
    }

    fn view_inventory(&self, trip: &MiningTrip) -> Html {
        html! {
            <aside class="inventory">
                <h3>{"Inventory"}</h3>
                if trip.inventory().is_empty() {
                    <p class="muted">{"Nothing collected yet."}</p>
                } else {
                    <ul>
                        {
                            for trip.inventory().iter().map(|item| html! {
                                <li class={rarity_class(item.mineral.rarity)}>
                                    {format!("{} · {} coins", item.label(), item.sell_value())}
                                </li>
                            })
                        }
                    </ul>
                }
                <p class="total">{format!("Value: {} coins", trip.inventory_value())}</p>
            </aside>
        }
    }

    fn view_identify(&self, ctx: &Context<Self>, find: &PendingFind) -> Html {
        let identification = &find.identification;
        let mineral = identification.mineral();
        let link = ctx.link();
        let body = match identification.phase() {
            IdentifyPhase::Correct => html! {
                <p class="correct">{format!("Correct! It's {}, worth {} coins.", mineral.name, mineral.value)}</p>
            },
            IdentifyPhase::Exhausted => html! {
                <>
                    <p class="hint">{"Out of guesses."}</p>
                    <p>{format!(
                        "Keep it unidentified for {} coins, or leave it behind.",
                        unidentified_value(mineral.value)
                    )}</p>
                </>
            },
            _ => html! {
                <>
                    <ToolPanel
                        mineral={mineral.clone()}
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
                </>
            },
        };
        let unresolved = !identification.is_resolved();
        html! {
            <Modal>
                <dialog class="identify" open={true}>
                    <article>
                        <header>
                            <Swatch mineral={mineral.clone()}/>
                            <h2>{"You found something!"}</h2>
                        </header>
                        {body}
                        if unresolved {
                            <footer>
                                <button class="secondary" onclick={link.callback(|_| Msg::Collect)}>
                                    {"Collect unidentified"}
                                </button>
                                <button class="secondary" onclick={link.callback(|_| Msg::Leave)}>
                                    {"Leave it"}
                                </button>
                            </footer>
                        }
                    </article>
                </dialog>
            </Modal>
        }
    }

    fn view_counter(&self, ctx: &Context<Self>, trip: &MiningTrip) -> Html {
        let receipt = trip.receipt();
        let qualifies = !self.score_saved && self.scores.qualifies_for_named(receipt.total);
        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::NameInput(input.value())
        });
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::SaveScore
        });
        html! {
            <div class="counter">
                <h2>{"Shop Counter"}</h2>
                if receipt.is_empty() {
                    <p class="muted">{"You came back empty-handed."}</p>
                } else {
                    <table class="receipt">
                        {
                            for receipt.lines.iter().map(|line| html! {
                                <tr class={classes!(rarity_class(line.rarity), (!line.identified).then_some("unidentified"))}>
                                    <td>{line.label.clone()}</td>
                                    <td>{line.value}</td>
                                </tr>
                            })
                        }
                        <tr class="total"><td>{"Total"}</td><td>{receipt.total}</td></tr>
                    </table>
                }
                if qualifies {
                    <form class="name-entry" {onsubmit}>
                        <label>{"New high score! Your name:"}</label>
                        <input
                            type="text"
                            maxlength={MAX_NAME_LEN.to_string()}
                            placeholder={DEFAULT_NAME}
                            value={self.name.clone()}
                            {oninput}
                        />
                        <button type="submit">{"Save"}</button>
                    </form>
                }
                <h3>{"High Scores"}</h3>
                <NamedScoreList scores={self.scores.named_scores()}/>
                <button onclick={ctx.link().callback(|_| Msg::NewTrip)}>{"New trip"}</button>
            </div>
        }
    }

    fn view_trip(&self, ctx: &Context<Self>, trip: &MiningTrip) -> Html {
        if trip.at_counter() {
            return self.view_counter(ctx, trip);
        }
        html! {
            <>
                <nav class="trip">
                    <strong>{trip.location().name.clone()}</strong>
                    <BatteryMeter
                        battery={trip.battery()}
                        max={trip.max_battery()}
                        low={trip.is_battery_low()}
                    />
                    <button class="secondary" onclick={ctx.link().callback(|_| Msg::EndTrip)}>
                        {"Head back to the shop"}
                    </button>
                </nav>
                if trip.is_battery_low() {
                    <p class="warning">{"Battery low!"}</p>
                }
                <div class="mine">
                    {self.view_grid(ctx, trip)}
                    {self.view_inventory(trip)}
                </div>
                if let Some(find) = trip.pending() {
                    {self.view_identify(ctx, find)}
                }
            </>
        }
    }
}

impl Component for ShopView {
    type Message = Msg;
    type Properties = ShopProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            trip: None,
            rng: seeded_rng(ctx.props().seed),
            scores: Scores::default(),
            last_outcome: None,
            name: String::new(),
            score_saved: false,
            timers: Timers::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        self.apply(ctx, msg).unwrap_or_else(|err| {
            log::warn!("shop: {err}");
            false
        })
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <section class="shop">
                {
                    match &self.trip {
                        Some(trip) => self.view_trip(ctx, trip),
                        None => self.view_locations(ctx),
                    }
                }
            </section>
        }
    }
}
