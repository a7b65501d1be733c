/*
 * Minimal borderless application: a 24px caption band that drags the window
 * like a native title bar, and a content panel filling the rest. Resize from
 * any edge, snap against screen edges, and double-click the caption to
 * maximize; closing the window from the task bar ends the program.
 */

#[cfg(target_os = "windows")]
fn main() -> chromeshell::PlatformResult<()> {
    use chromeshell::{ShellApp, ShellConfig};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let app = ShellApp::new("ChromeShellDemo")?;
    let config = ShellConfig::default()
        .with_title("chromeshell demo")
        .with_size(800, 600);
    let window = app.create_window(&config)?;

    let caption = window.create_panel()?;
    window.set_custom_caption(Some(Box::new(caption)), true, 24)?;

    let content = window.create_panel()?;
    window.set_content(Some(Box::new(content)))?;

    log::info!(
        "caption {:?}, content {:?}",
        window.caption_handle()?,
        window.content_handle()?
    );

    window.show(true)?;
    app.run()
}

#[cfg(not(target_os = "windows"))]
fn main() {
    env_logger::init();
    log::warn!("the borderless shell demo needs a Win32 desktop");
}
