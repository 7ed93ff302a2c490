use dioxus::prelude::*;

use store::ClientConfig;
use ui::AuthProvider;
use views::{AuthenticatedShell, Home, Root};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[layout(AuthenticatedShell)]
        #[route("/home")]
        Home {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Bundled configuration, see `secret-santa.toml`.
const BUNDLED_CONFIG: &str = include_str!("../secret-santa.toml");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

/// The bundled config with the build-time API override applied.
fn load_config() -> ClientConfig {
    let config = ClientConfig::from_toml(BUNDLED_CONFIG).unwrap_or_else(|err| {
        tracing::error!(%err, "bundled {} unreadable, using defaults", ClientConfig::filename());
        ClientConfig::default()
    });
    match option_env!("SECRET_SANTA_API_URL") {
        Some(url) => config.with_base_url(url),
        None => config,
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            config,
            Router::<Route> {}
        }
    }
}
