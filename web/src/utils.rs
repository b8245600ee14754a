use gloo::timers::callback::Timeout;
use rockhound_core::{Mineral, Rarity, Route};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attach the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn current_route() -> Route {
    let hash = gloo::utils::window()
        .location()
        .hash()
        .unwrap_or_default();
    Route::parse(&hash)
}

pub(crate) fn href(route: &Route) -> String {
    format!("#{}", route.to_path())
}

pub(crate) fn navigate(route: &Route) {
    if let Err(err) = gloo::utils::window().location().set_hash(&route.to_path()) {
        log::error!("failed to navigate to {:?}: {:?}", route, err);
    }
}

pub(crate) fn rarity_class(rarity: Rarity) -> &'static str {
    match rarity {
        Rarity::Common => "rarity-common",
        Rarity::Uncommon => "rarity-uncommon",
        Rarity::Rare => "rarity-rare",
    }
}

/// Inline style painting a swatch with the specimen's main colour.
pub(crate) fn swatch_style(mineral: &Mineral) -> String {
    let color = mineral.color.first().map_or("#888888", String::as_str);
    format!("background-color: {color}")
}

/// Coloured chip standing in for a specimen picture.
#[derive(Properties, PartialEq)]
pub(crate) struct SwatchProps {
    pub mineral: Mineral,
    #[prop_or_default]
    pub sparkle: bool,
}

#[function_component]
pub(crate) fn Swatch(props: &SwatchProps) -> Html {
    let class = classes!(
        "swatch",
        rarity_class(props.mineral.rarity),
        props.sparkle.then_some("sparkle")
    );
    html! {
        <span {class} style={swatch_style(&props.mineral)}/>
    }
}

/// Pending timeouts keyed by the event each one delivers.
///
/// Dropping a `Timeout` cancels it, so clearing the set or dropping the owner stops every callback.
pub(crate) struct Timers<E> {
    pending: BTreeMap<E, Timeout>,
}

impl<E: Ord> Default for Timers<E> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
        }
    }
}

impl<E: Ord> Timers<E> {
    /// Replaces (and cancels) any timeout already pending for `event`.
    pub fn insert(&mut self, event: E, timeout: Timeout) {
        self.pending.insert(event, timeout);
    }

    /// Forgets the timeout that just delivered `event`.
    pub fn fired(&mut self, event: &E) {
        // its callback is still on the stack, so release it without clearing
        if let Some(timeout) = self.pending.remove(event) {
            let _ = timeout.forget();
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
