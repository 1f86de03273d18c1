pub mod styles;
pub mod components;
pub mod pages;

use yew::prelude::*;
use crate::pages::frontend_wheel_round::FrontendWheelRound;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class="min-h-screen w-full bg-gray-50 dark:bg-gray-900">
            <div class="mx-auto">
                <FrontendWheelRound />
            </div>
        </div>
    }
}
