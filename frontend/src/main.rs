use frontend::App;
use yew::Renderer;

fn main() {
    // Route log macros to the browser console
    wasm_logger::init(wasm_logger::Config::default());

    Renderer::<App>::new().render();
}
