use crate::home::HomeView;
use crate::reference::{MineralDetailView, ReferenceView};
use crate::shop::ShopView;
use crate::toolshed::ToolShedView;
use crate::utils::*;
use gloo::events::EventListener;
use rockhound_core::{Catalog, Route};
use std::rc::Rc;
use yew::prelude::*;

pub(crate) enum Msg {
    RouteChanged(Route),
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct AppProps {
    /// Force a seed instead of random
    pub seed: Option<u64>,
}

pub(crate) struct App {
    route: Route,
    catalog: Option<Rc<Catalog>>,
    seed: u64,
    _hash_listener: EventListener,
}

impl App {
    fn listen_for_routes(ctx: &Context<Self>) -> EventListener {
        let link = ctx.link().clone();
        EventListener::new(&gloo::utils::window(), "hashchange", move |_| {
            link.send_message(Msg::RouteChanged(current_route()))
        })
    }

    fn view_route(&self, catalog: &Rc<Catalog>) -> Html {
        let catalog = catalog.clone();
        let seed = self.seed;
        let key = self.route.to_path();
        match &self.route {
            Route::Home => html! { <HomeView/> },
            Route::ToolShed { mineral } => html! {
                <ToolShedView key={key} {catalog} {seed} forced={mineral.clone()}/>
            },
            Route::Shop => html! { <ShopView {catalog} {seed}/> },
            Route::Reference => html! { <ReferenceView {catalog}/> },
            Route::MineralDetail(id) => html! {
                <MineralDetailView key={key} {catalog} id={id.clone()}/>
            },
        }
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = AppProps;

    fn create(ctx: &Context<Self>) -> Self {
        let catalog = match Catalog::builtin() {
            Ok(catalog) => Some(Rc::new(catalog)),
            Err(err) => {
                log::error!("Could not load mineral catalog: {err}");
                None
            }
        };
        Self {
            route: current_route(),
            catalog,
            seed: ctx.props().seed.unwrap_or_else(js_random_seed),
            _hash_listener: App::listen_for_routes(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::RouteChanged(route) => {
                log::debug!("route: {:?}", route);
                if self.route != route {
                    self.route = route;
                    // a fresh seed per screen, reproducible from the launch seed
                    self.seed = self.seed.wrapping_add(1);
                    true
                } else {
                    false
                }
            }
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <>
                <header>
                    <nav>
                        <a href={href(&Route::Home)}><strong>{"Rockhound"}</strong></a>
                        <ul>
                            <li><a href={href(&Route::ToolShed { mineral: None })}>{"Tool Shed"}</a></li>
                            <li><a href={href(&Route::Shop)}>{"Shop"}</a></li>
                            <li><a href={href(&Route::Reference)}>{"Reference"}</a></li>
                        </ul>
                    </nav>
                </header>
                <main>
                    {
                        match &self.catalog {
                            Some(catalog) => self.view_route(catalog),
                            None => html! {
                                <p class="error">{"The mineral catalog could not be loaded."}</p>
                            },
                        }
                    }
                </main>
            </>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        gloo::utils::document().set_title(self.route.title());
    }
}
