#[cfg(not(target_arch = "wasm32"))]
use eframe::egui;
use five_queens_hill_climb::app::HillClimbApp;
#[cfg(not(target_arch = "wasm32"))]
use five_queens_hill_climb::BOARD_SIZE;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    let side = BOARD_SIZE as f32 * 100.0;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([side + 420.0, side + 160.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Five Queens (Hill Climbing)",
        options,
        Box::new(|cc| Ok(Box::new(HillClimbApp::new(cc)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    // Redirect `log` messages to the browser console.
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .and_then(|win| win.document())
            .expect("Could not find document");
        let canvas = document
            .get_element_by_id("the_canvas_id")
            .expect("Could not find canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("Element is not a canvas");

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| {
                    // Recommended for web: avoid infinite resize loops
                    cc.egui_ctx.set_pixels_per_point(1.0);
                    Ok(Box::new(HillClimbApp::new(cc)))
                }),
            )
            .await
            .expect("failed to start eframe");
    });
}
