use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatusBarProps {
    pub counter_text: String,
    /// 0.0..=1.0 of the tap deadline left.
    pub progress_fraction: f64,
    pub remaining_ms_text: String,
}

#[function_component(StatusBar)]
pub fn status_bar(props: &StatusBarProps) -> Html {
    html! {
        <div id="tap-timer-bar" style="width:100%; display:flex; align-items:center; gap:12px; padding:8px 12px; box-sizing:border-box;">
            <div id="counter" style="font-size:20px; font-weight:600; min-width:110px;">{ props.counter_text.clone() }</div>
            <div style="flex:1; height:10px; background:#161b22; border:1px solid #30363d; border-radius:5px; overflow:hidden;">
                <div style={format!(
                    "height:100%; background:#3fb950; transform-origin:left; transform:scaleX({});",
                    props.progress_fraction
                )}></div>
            </div>
            <div id="time-ms-left" style="font-variant-numeric:tabular-nums; min-width:70px; text-align:right;">{ props.remaining_ms_text.clone() }</div>
        </div>
    }
}
