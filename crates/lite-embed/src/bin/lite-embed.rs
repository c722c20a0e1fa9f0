//! lite-embed - render an embed and print what the page ends up with
//!
//! Usage: lite-embed <videoid> [--playlist <id>] [--nocookie] [--vimeo]
//!                   [--config <file.json>] [--online]

use anyhow::{Context, bail};
use lite_dom::{get_inner_html, get_outer_html};
use lite_embed::{EmbedConfig, HttpMetadataSource, Page, attributes};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    video_id: String,
    playlist: Option<String>,
    nocookie: bool,
    vimeo: bool,
    online: bool,
    config: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--playlist" => args.playlist = Some(iter.next().context("--playlist needs an id")?),
            "--config" => args.config = Some(iter.next().context("--config needs a path")?),
            "--nocookie" => args.nocookie = true,
            "--vimeo" => args.vimeo = true,
            "--online" => args.online = true,
            flag if flag.starts_with("--") => bail!("unknown flag {}", flag),
            _ => args.video_id = arg,
        }
    }
    if args.video_id.is_empty() {
        bail!("usage: lite-embed <videoid> [--playlist <id>] [--nocookie] [--vimeo] [--config <file>] [--online]");
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?;
            EmbedConfig::from_json(&json)?
        }
        None => EmbedConfig::default(),
    };

    let mut page = Page::new("about:blank", config)?;

    let mut attrs = vec![(attributes::VIDEO_ID, args.video_id.as_str())];
    if let Some(playlist) = &args.playlist {
        attrs.push((attributes::PLAYLIST_ID, playlist.as_str()));
    }
    if args.nocookie {
        attrs.push((attributes::NOCOOKIE, ""));
    }

    let node = if args.vimeo {
        page.create_vimeo(&attrs)?
    } else {
        page.create_youtube(&attrs)?
    };

    if args.vimeo && args.online {
        let source = HttpMetadataSource::new(&page.config().vimeo_api_base, &page.config().user_agent);
        match smol::block_on(page.settle_posters(&source)) {
            Ok(n) => tracing::info!("{} poster(s) resolved", n),
            Err(err) => tracing::warn!("posters unavailable: {}", err),
        }
    }

    println!("== placeholder ==");
    println!("{}", get_outer_html(&page.document().tree, node));

    page.pointer_over(node);
    page.click(node);

    println!("== head ==");
    println!("{}", get_inner_html(&page.document().tree, page.document().head()));

    let iframe = match page.embed(node) {
        Some(lite_embed::Embed::YouTube(yt)) => yt.iframe(),
        Some(lite_embed::Embed::Vimeo(vm)) => vm.iframe(),
        None => None,
    };
    println!("== player ==");
    match iframe {
        Some(iframe) => println!("{}", get_outer_html(&page.document().tree, iframe)),
        None => println!("(not activated)"),
    }

    Ok(())
}
