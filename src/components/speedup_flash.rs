use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SpeedupFlashProps {
    /// Each new value replays the flash.
    pub epoch: u32,
}

#[function_component(SpeedupFlash)]
pub fn speedup_flash(props: &SpeedupFlashProps) -> Html {
    if props.epoch == 0 {
        return html! {};
    }
    // keyed on the epoch so the CSS animation restarts
    html! {
        <div key={props.epoch} class="speedup-flash" style="position:absolute; inset:0; pointer-events:none; z-index:40;" />
    }
}
