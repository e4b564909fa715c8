//! Command-line front end: embed the fallback face into a PDF, or derive
//! the per-face asset files from a TrueType font.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::info;

use pdf_font_fallback::fonts::{liberation, tables};
use pdf_font_fallback::{
    embed_truetype_font, init_tracing, AssetLocations, DirectoryProvider, DocumentChanges,
};

#[derive(Parser)]
#[command(name = "pdf-font-fallback")]
#[command(about = "Embed the bundled fallback face into PDF documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed the fallback font and wire it into the first page's resources.
    Embed {
        /// PDF to read.
        input: PathBuf,
        /// Where to write the updated PDF.
        output: PathBuf,
        /// Directory holding `<face>.ttf` and `<face>_CidToGIDMap.bin`.
        #[arg(long, default_value = "assets")]
        asset_dir: PathBuf,
        /// Face to embed; only the bundled face ships static tables.
        #[arg(long, default_value = liberation::FACE_NAME)]
        font_name: String,
        /// Resource name the font is registered under.
        #[arg(long, default_value = "Fb1")]
        resource: String,
    },
    /// Derive the CID-to-GID map, width tables and ToUnicode CMap from a TTF.
    GenAssets {
        /// TrueType font to read.
        font: PathBuf,
        /// Output directory; defaults to the font's directory.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    match Cli::parse().command {
        Commands::Embed {
            input,
            output,
            asset_dir,
            font_name,
            resource,
        } => embed(input, output, asset_dir, font_name, resource).await,
        Commands::GenAssets { font, out_dir } => gen_assets(font, out_dir),
    }
}

async fn embed(
    input: PathBuf,
    output: PathBuf,
    asset_dir: PathBuf,
    font_name: String,
    resource: String,
) -> Result<()> {
    let bytes = tokio::fs::read(&input)
        .await
        .with_context(|| format!("reading {}", input.display()))?;
    let mut document = Document::load_mem(&bytes)
        .with_context(|| format!("parsing {}", input.display()))?;

    let provider = DirectoryProvider::new(AssetLocations {
        font_dir: asset_dir,
        glyph_map_dir: None,
    });
    let mut changes = DocumentChanges::new();
    let font_ref = embed_truetype_font(&font_name, &provider, &mut document, &mut changes).await?;
    let registered = changes.len();
    changes.apply_to(&mut document);
    attach_to_first_page(&mut document, &resource, font_ref)?;

    document
        .save(&output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(
        font_name,
        registered,
        resource,
        output = %output.display(),
        "embedded fallback font"
    );
    Ok(())
}

/// Register `font_ref` under `/Resources /Font <resource>` on the first
/// page, resolving indirect resource and font dictionaries along the way.
fn attach_to_first_page(document: &mut Document, resource: &str, font_ref: ObjectId) -> Result<()> {
    let (_, page_id) = document
        .get_pages()
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("document has no pages"))?;
    let page = document
        .get_dictionary(page_id)
        .context("page dictionary missing")?
        .clone();

    let (resources_id, mut resources) = match page.get(b"Resources") {
        Ok(Object::Reference(id)) => (
            Some(*id),
            document
                .get_dictionary(*id)
                .context("resource dictionary missing")?
                .clone(),
        ),
        Ok(Object::Dictionary(dict)) => (None, dict.clone()),
        _ => (None, Dictionary::new()),
    };

    let mut fonts = match resources.get(b"Font") {
        Ok(Object::Dictionary(dict)) => dict.clone(),
        Ok(Object::Reference(id)) => document
            .get_dictionary(*id)
            .context("font resource dictionary missing")?
            .clone(),
        _ => Dictionary::new(),
    };
    fonts.set(resource, font_ref);
    resources.set("Font", fonts);

    match resources_id {
        Some(id) => {
            document.objects.insert(id, Object::Dictionary(resources));
        }
        None => {
            let page = document
                .get_object_mut(page_id)
                .and_then(Object::as_dict_mut)
                .map_err(|_| anyhow!("page is not a dictionary"))?;
            page.set("Resources", resources);
        }
    }
    Ok(())
}

fn gen_assets(font: PathBuf, out_dir: Option<PathBuf>) -> Result<()> {
    let data =
        std::fs::read(&font).with_context(|| format!("reading {}", font.display()))?;
    let face = ttf_parser::Face::parse(&data, 0)
        .map_err(|err| anyhow!("parsing {}: {err}", font.display()))?;

    let stem = font
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow!("font path has no usable stem"))?
        .to_owned();
    let out_dir = out_dir.or_else(|| font.parent().map(Path::to_path_buf)).unwrap_or_default();
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let map = tables::cid_to_gid_map_bytes(&face, tables::CID_RANGE_END)?;
    let map_path = out_dir.join(tables::cid_to_gid_map_file(&stem));
    std::fs::write(&map_path, &map)
        .with_context(|| format!("writing {}", map_path.display()))?;
    info!(path = %map_path.display(), bytes = map.len(), "wrote CID-to-GID map");

    let widths = tables::glyph_widths(&face)?;
    let widths_path = out_dir.join(format!("{stem}_widths.json"));
    std::fs::write(&widths_path, serde_json::to_vec_pretty(&widths)?)
        .with_context(|| format!("writing {}", widths_path.display()))?;
    info!(
        path = %widths_path.display(),
        default_width = widths.default_width,
        runs = widths.runs.len(),
        "wrote width tables"
    );

    let cmap = tables::unicode_cmap(&stem, &tables::face_codepoints(&face)?);
    let cmap_path = out_dir.join(format!("{stem}.cmap"));
    std::fs::write(&cmap_path, cmap)
        .with_context(|| format!("writing {}", cmap_path.display()))?;
    info!(path = %cmap_path.display(), "wrote ToUnicode CMap");

    Ok(())
}
