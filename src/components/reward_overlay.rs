use yew::prelude::*;

use tap_grid::config::REWARD_IMAGE;

#[derive(Properties, PartialEq, Clone)]
pub struct RewardOverlayProps {
    pub show: bool,
}

#[function_component(RewardOverlay)]
pub fn reward_overlay(props: &RewardOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    html! {
        <div id="image-overlay" aria-hidden="false" style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.9); z-index:50;">
            <img src={REWARD_IMAGE} alt="Target reached" style="max-width:100%; max-height:100%; object-fit:contain;" />
        </div>
    }
}
