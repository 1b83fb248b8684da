use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TileGridProps {
    pub columns: u32,
    pub tile_count: usize,
    pub highlighted: Option<usize>,
    pub width_px: f64,
    pub height_px: f64,
    pub on_tap: Callback<usize>,
}

#[function_component(TileGrid)]
pub fn tile_grid(props: &TileGridProps) -> Html {
    let tiles = (0..props.tile_count).map(|i| {
        let lit = props.highlighted == Some(i);
        let onclick = {
            let cb = props.on_tap.clone();
            Callback::from(move |_e: MouseEvent| cb.emit(i))
        };
        // Enter / Space activate a focused tile
        let onkeydown = {
            let cb = props.on_tap.clone();
            Callback::from(move |e: KeyboardEvent| {
                let key = e.key();
                if key == "Enter" || key == " " {
                    e.prevent_default();
                    cb.emit(i);
                }
            })
        };
        let bg = if lit { "#58a6ff" } else { "#161b22" };
        html! {
            <div key={i}
                class={classes!("tile", lit.then_some("highlight"))}
                role="button"
                tabindex="0"
                data-index={i.to_string()}
                onclick={onclick}
                onkeydown={onkeydown}
                style={format!("background:{bg}; border:1px solid #30363d; border-radius:10px; cursor:pointer;")}
            />
        }
    });
    html! {
        <div id="grid" style={format!(
            "display:grid; grid-template-columns:repeat({}, 1fr); gap:6px; width:{}px; height:{}px; margin:auto;",
            props.columns.max(1), props.width_px, props.height_px
        )}>
            { for tiles }
        </div>
    }
}
