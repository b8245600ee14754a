use crate::storage::LocalStore;
use crate::utils::*;
use rockhound_core::*;
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

pub(crate) enum Msg {
    Search(String),
    Luster(Option<Luster>),
    Rarity(Option<Rarity>),
    HardnessMin(f32),
    HardnessMax(f32),
    Magnetic(MagneticFilter),
    Location(Option<String>),
    Reset,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct ReferenceProps {
    pub catalog: Rc<Catalog>,
}

pub(crate) struct ReferenceView {
    filters: ReferenceFilters,
    search: String,
    store: LocalStore,
}

fn select_value(e: Event) -> String {
    let select: HtmlSelectElement = e.target_unchecked_into();
    select.value()
}

fn input_value(e: InputEvent) -> String {
    let input: HtmlInputElement = e.target_unchecked_into();
    input.value()
}

/// Looks a choice up by its display name; empty or unknown means "any".
fn parse_choice<T: Copy>(all: &[T], name: impl Fn(T) -> &'static str, value: &str) -> Option<T> {
    all.iter().copied().find(|&choice| name(choice) == value)
}

impl ReferenceView {
    fn view_filters(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let filters = &self.filters;
        let on_luster = link.callback(|e: Event| {
            Msg::Luster(parse_choice(&Luster::ALL, Luster::name, &select_value(e)))
        });
        let on_rarity = link.callback(|e: Event| {
            Msg::Rarity(parse_choice(&Rarity::ALL, Rarity::name, &select_value(e)))
        });
        let on_magnetic = link.callback(|e: Event| {
            Msg::Magnetic(MagneticFilter::from_name(&select_value(e)).unwrap_or_default())
        });
        let on_location = link.callback(|e: Event| {
            let value = select_value(e);
            Msg::Location((!value.is_empty()).then_some(value))
        });
        let on_min = link.callback(|e: InputEvent| {
            Msg::HardnessMin(input_value(e).parse().unwrap_or(MIN_HARDNESS))
        });
        let on_max = link.callback(|e: InputEvent| {
            Msg::HardnessMax(input_value(e).parse().unwrap_or(MAX_HARDNESS))
        });

        html! {
            <form class="filters" onsubmit={Callback::from(|e: SubmitEvent| e.prevent_default())}>
                <input
                    type="search"
                    placeholder="Search minerals..."
                    value={self.search.clone()}
                    oninput={link.callback(|e: InputEvent| Msg::Search(input_value(e)))}
                />
                <select onchange={on_luster}>
                    <option value="" selected={filters.luster.is_none()}>{"Any luster"}</option>
                    {
                        for Luster::ALL.into_iter().map(|luster| html! {
                            <option
                                value={luster.name()}
                                title={luster.description()}
                                selected={filters.luster == Some(luster)}
                            >
                                {luster.name()}
                            </option>
                        })
                    }
                </select>
                <select onchange={on_rarity}>
                    <option value="" selected={filters.rarity.is_none()}>{"Any rarity"}</option>
                    {
                        for Rarity::ALL.into_iter().map(|rarity| html! {
                            <option value={rarity.name()} selected={filters.rarity == Some(rarity)}>
                                {rarity.name()}
                            </option>
                        })
                    }
                </select>
                <select onchange={on_magnetic}>
                    {
                        for MagneticFilter::ALL.into_iter().map(|magnetic| html! {
                            <option value={magnetic.name()} selected={filters.magnetic == magnetic}>
                                {match magnetic {
                                    MagneticFilter::All => "Magnetic: any",
                                    MagneticFilter::Yes => "Magnetic only",
                                    MagneticFilter::No => "Non-magnetic",
                                }}
                            </option>
                        })
                    }
                </select>
                <select onchange={on_location}>
                    <option value="" selected={filters.location.is_none()}>{"Any location"}</option>
                    {
                        for ctx.props().catalog.locations().iter().map(|location| html! {
                            <option
                                value={location.id.clone()}
                                selected={filters.location.as_deref() == Some(location.id.as_str())}
                            >
                                {location.name.clone()}
                            </option>
                        })
                    }
                </select>
                <label>
                    {"Hardness "}
                    <input
                        type="number" min="1" max="10" step="0.5"
                        value={filters.hardness_min.to_string()}
                        oninput={on_min}
                    />
                    {" to "}
                    <input
                        type="number" min="1" max="10" step="0.5"
                        value={filters.hardness_max.to_string()}
                        oninput={on_max}
                    />
                </label>
                if filters.is_active() || !self.search.is_empty() {
                    <button type="button" class="secondary" onclick={link.callback(|_| Msg::Reset)}>
                        {"Clear filters"}
                    </button>
                }
            </form>
        }
    }
}

impl Component for ReferenceView {
    type Message = Msg;
    type Properties = ReferenceProps;

    fn create(_ctx: &Context<Self>) -> Self {
        let store = LocalStore;
        Self {
            filters: ReferenceFilters::load(&store),
            search: String::new(),
            store,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let filters = &mut self.filters;
        match msg {
            Msg::Search(search) => {
                self.search = search;
                return true;
            }
            Msg::Luster(luster) => filters.luster = luster,
            Msg::Rarity(rarity) => filters.rarity = rarity,
            Msg::HardnessMin(min) => filters.hardness_min = min.clamp(MIN_HARDNESS, MAX_HARDNESS),
            Msg::HardnessMax(max) => filters.hardness_max = max.clamp(MIN_HARDNESS, MAX_HARDNESS),
            Msg::Magnetic(magnetic) => filters.magnetic = magnetic,
            Msg::Location(location) => filters.location = location,
            Msg::Reset => {
                *filters = ReferenceFilters::default();
                self.search.clear();
            }
        }
        self.filters.save(&mut self.store);
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let found = self.filters.apply(&ctx.props().catalog, &self.search);
        html! {
            <section class="reference">
                <h1>{"Mineral Reference"}</h1>
                {self.view_filters(ctx)}
                <p class="muted">{format!("{} minerals", found.len())}</p>
                <ul class="mineral-grid">
                    {
                        for found.into_iter().map(|mineral| html! {
                            <li class={rarity_class(mineral.rarity)}>
                                <a href={href(&Route::MineralDetail(mineral.id.clone()))}>
                                    <Swatch mineral={mineral.clone()}/>
                                    <strong>{mineral.name.clone()}</strong>
                                    <small>{format!(
                                        "H {} · {} · {}",
                                        mineral.hardness,
                                        mineral.luster,
                                        mineral.rarity
                                    )}</small>
                                </a>
                            </li>
                        })
                    }
                </ul>
            </section>
        }
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct DetailProps {
    pub catalog: Rc<Catalog>,
    pub id: String,
}

#[function_component]
pub(crate) fn MineralDetailView(props: &DetailProps) -> Html {
    let mineral = match DetailView::resolve(&props.catalog, &props.id) {
        DetailView::Found(mineral) => mineral,
        DetailView::NotFound(id) => {
            return html! {
                <section class="mineral-detail not-found">
                    <h1>{"Mineral not found"}</h1>
                    <p>{format!("There is no mineral called \"{id}\" in the reference.")}</p>
                    <a href={href(&Route::Reference)}>{"Back to the reference"}</a>
                </section>
            };
        }
    };

    let locations: Vec<String> = mineral
        .locations
        .iter()
        .map(|id| {
            props
                .catalog
                .location(id)
                .map_or_else(|| id.clone(), |location| location.name.clone())
        })
        .collect();
    let practice = Route::ToolShed {
        mineral: Some(mineral.id.clone()),
    };
    let onclick = Callback::from(move |_| navigate(&practice));

    html! {
        <section class={classes!("mineral-detail", rarity_class(mineral.rarity))}>
            <a href={href(&Route::Reference)}>{"← All minerals"}</a>
            <header>
                <Swatch mineral={mineral.clone()}/>
                <h1>{mineral.name.clone()}</h1>
                <p class="muted">{format!("{} · {} coins", mineral.rarity, mineral.value)}</p>
            </header>
            <p>{mineral.description.clone()}</p>
            <dl>
                <dt>{"Hardness"}</dt>
                <dd>{format!("{} ({})", mineral.hardness, hardness_description(mineral.hardness))}</dd>
                <dt>{"Streak"}</dt>
                <dd>{mineral.streak.clone()}</dd>
                <dt>{"Luster"}</dt>
                <dd>{format!("{} ({})", mineral.luster, mineral.luster.description())}</dd>
                <dt>{"Cleavage"}</dt>
                <dd>{format!("{} ({})", mineral.cleavage, mineral.cleavage.description())}</dd>
                <dt>{"Colour"}</dt>
                <dd>{mineral.color_names.join(", ")}</dd>
                <dt>{"Magnetic"}</dt>
                <dd>{if mineral.magnetic { "Yes" } else { "No" }}</dd>
                <dt>{"Density"}</dt>
                <dd>{format!("{:.2} g/cm³ ({})", mineral.density, density_description(mineral.density))}</dd>
                if let Some(system) = &mineral.crystal_system {
                    <dt>{"Crystal system"}</dt>
                    <dd>{system.clone()}</dd>
                }
                if let Some(formula) = &mineral.formula {
                    <dt>{"Formula"}</dt>
                    <dd>{formula.clone()}</dd>
                }
                <dt>{"Found at"}</dt>
                <dd>{locations.join(", ")}</dd>
            </dl>
            <aside class="fun-fact">{mineral.fun_fact.clone()}</aside>
            <button {onclick}>{"Practise identifying it in the Tool Shed"}</button>
        </section>
    }
}
