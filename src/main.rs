mod components;
mod state;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
