use log::Level;
use trc20_dashboard::app::App;

fn main() {
    _ = console_log::init_with_level(Level::Debug);
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
