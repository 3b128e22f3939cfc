use std::path::PathBuf;

const USAGE: &str = "Usage: card-viewer [--config <path>] <profile-link>
       card-viewer [--config <path>] --tui-smoke[=loading|notfound|premium|elite|black|sales|inactive|share]
       card-viewer [--config <path>] --print-config";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{}", USAGE);
        return;
    }

    // --config <path> or --config=<path>; everything else not starting with "--" is the link.
    let mut config_path: Option<PathBuf> = None;
    let mut link: Option<String> = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            match iter.next() {
                Some(p) => config_path = Some(PathBuf::from(p)),
                None => {
                    eprintln!("--config requires a path\n{}", USAGE);
                    std::process::exit(2);
                }
            }
        } else if let Some(p) = arg.strip_prefix("--config=") {
            config_path = Some(PathBuf::from(p));
        } else if !arg.starts_with("--") && link.is_none() {
            link = Some(arg.clone());
        }
    }
    let config_path = config_path.as_deref();

    if args.iter().any(|a| a == "--print-config") {
        card_viewer::print_config(config_path);
        return;
    }

    // Non-interactive TUI smoke test mode (for automated checks).
    // Renders a single frame for a specific screen and exits 0.
    if let Some(arg) = args
        .iter()
        .find(|a| a.as_str() == "--tui-smoke" || a.starts_with("--tui-smoke="))
    {
        let target = arg
            .split_once('=')
            .map(|(_, v)| v.to_string())
            .filter(|v| !v.trim().is_empty());
        card_viewer::run_tui_smoke(target, config_path);
        return;
    }

    // No link still opens the viewer: it lands on the not-found screen.
    card_viewer::run_tui(link.as_deref().unwrap_or(""), config_path);
}
