use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use rust_qr_gen::export::{self, ExportFormat};
use rust_qr_gen::models::{BorderStyle, ContentKind, ECLevel, Logo, OptionChange, QrOptions, Rgb};
use rust_qr_gen::{Controller, PreviewState, Render, config};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qrgen", version, about = "Styled QR code generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render content and export it
    Generate {
        #[command(flatten)]
        style: StyleArgs,
        /// Export format (repeatable: png, jpeg, svg)
        #[arg(long = "format", short = 'f', default_value = "png")]
        formats: Vec<ExportFormat>,
        /// Output directory (defaults to QR_OUTPUT_DIR or .)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Also copy the raster to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Rebuild an SVG from an existing QR bitmap
    Vectorize {
        /// Input image (PNG, JPEG, ...)
        #[arg(long)]
        image: PathBuf,
        /// Output SVG path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Dark module colour
        #[arg(long, default_value = "#000000")]
        fg: Rgb,
        /// Background colour
        #[arg(long, default_value = "#ffffff")]
        bg: Rgb,
    },
    /// Print the render summary without writing files
    Info {
        #[command(flatten)]
        style: StyleArgs,
    },
}

#[derive(Args)]
struct StyleArgs {
    /// Content to encode
    content: String,
    /// Content kind (text, url, email, phone, location)
    #[arg(long, default_value = "text")]
    kind: ContentKind,
    /// Canvas side in pixels (100-500)
    #[arg(long, default_value_t = 200)]
    size: u32,
    /// Dark module colour
    #[arg(long, default_value = "#000000")]
    fg: Rgb,
    /// Background colour
    #[arg(long, default_value = "#ffffff")]
    bg: Rgb,
    /// Quiet zone in modules (0-10)
    #[arg(long, default_value_t = 4)]
    margin: u32,
    /// Error correction level (L, M, Q, H)
    #[arg(long, default_value = "M")]
    ec: ECLevel,
    /// Logo image to place in the centre
    #[arg(long)]
    logo: Option<PathBuf>,
    /// Logo side as a percentage of the canvas (15-25)
    #[arg(long, default_value_t = 20)]
    logo_size: u32,
    /// Border style (none, solid, dashed, dotted)
    #[arg(long, default_value = "none")]
    border: BorderStyle,
    /// Border colour
    #[arg(long, default_value = "#000000")]
    border_color: Rgb,
    /// Border width in pixels (1-20)
    #[arg(long, default_value_t = 2)]
    border_width: u32,
}

impl StyleArgs {
    fn options(&self) -> anyhow::Result<QrOptions> {
        let logo = match &self.logo {
            Some(path) => Some(
                Logo::from_path(path)
                    .with_context(|| format!("reading logo {}", path.display()))?,
            ),
            None => None,
        };

        let changes = [
            OptionChange::Size(self.size),
            OptionChange::Foreground(self.fg),
            OptionChange::Background(self.bg),
            OptionChange::Margin(self.margin),
            OptionChange::EcLevel(self.ec),
            OptionChange::Logo(logo),
            OptionChange::LogoSize(self.logo_size),
            OptionChange::BorderStyle(self.border),
            OptionChange::BorderColor(self.border_color),
            OptionChange::BorderWidth(self.border_width),
        ];
        Ok(changes
            .into_iter()
            .fold(QrOptions::default(), |options, change| options.apply(change)))
    }

    fn render(&self) -> anyhow::Result<Render> {
        let options = self.options()?;
        if let Some(reason) = options.ec_level_lock() {
            if self.ec != ECLevel::H {
                log::warn!("--ec {} ignored: {}", self.ec, reason);
            }
        }

        let mut controller = Controller::new(options);
        controller.set_kind(self.kind);
        controller.set_content(self.content.as_str());
        match controller.render_now() {
            PreviewState::Ready(render) => Ok(render.as_ref().clone()),
            PreviewState::Placeholder => {
                bail!("nothing to encode (try: {})", self.kind.placeholder())
            }
            PreviewState::Failed { message } => bail!("{message}"),
            PreviewState::Pending => bail!("render did not complete"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            style,
            formats,
            out_dir,
            copy,
        } => generate_cmd(&style, &formats, out_dir, copy),
        Command::Vectorize { image, out, fg, bg } => vectorize_cmd(image, out, fg, bg),
        Command::Info { style } => info_cmd(&style),
    }
}

fn generate_cmd(
    style: &StyleArgs,
    formats: &[ExportFormat],
    out_dir: Option<PathBuf>,
    copy: bool,
) -> anyhow::Result<()> {
    let render = style.render()?;
    let dir = out_dir.unwrap_or_else(config::output_dir);

    for &format in formats {
        let path = export::save(&render, format, &dir)
            .with_context(|| format!("exporting {format}"))?;
        println!("{}", path.display());
    }

    if copy {
        copy_cmd(&render)?;
    }
    Ok(())
}

#[cfg(feature = "clipboard")]
fn copy_cmd(render: &Render) -> anyhow::Result<()> {
    export::copy_to_clipboard(render).context("copying to clipboard")?;
    println!("Copied to clipboard");
    Ok(())
}

#[cfg(not(feature = "clipboard"))]
fn copy_cmd(_render: &Render) -> anyhow::Result<()> {
    bail!("built without clipboard support")
}

fn vectorize_cmd(image: PathBuf, out: Option<PathBuf>, fg: Rgb, bg: Rgb) -> anyhow::Result<()> {
    let style = QrOptions::default()
        .apply(OptionChange::Foreground(fg))
        .apply(OptionChange::Background(bg));
    let reconstruction = rust_qr_gen::vectorize_file(&image, &style)
        .with_context(|| format!("vectorizing {}", image.display()))?;
    log::info!(
        "module size {}px, {} dark modules",
        reconstruction.module_size,
        reconstruction.dark_modules
    );

    let svg = reconstruction.to_svg_string();
    match out {
        Some(path) => {
            std::fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
            println!("{}", path.display());
        }
        None => print!("{svg}"),
    }
    Ok(())
}

fn info_cmd(style: &StyleArgs) -> anyhow::Result<()> {
    let render = style.render()?;
    println!("{}", render.info());
    if let Some(reason) = render.options().ec_level_lock() {
        println!("Note:       {reason}");
    }
    Ok(())
}
