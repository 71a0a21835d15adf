mod app;
mod editor_core;
mod ingest;
mod records;
mod render;
mod settings;
mod store;
mod theme;

use app::*;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(|| {
        view! { <App/> }
    })
}
