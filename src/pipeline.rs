// src/pipeline.rs
//! The export pipeline: convert a page, localize its images, write it, then
//! do the same for every child page it links to.
//!
//! The root page is written to `<output>/index.md`; each child page gets
//! its own directory below its parent's.

use crate::crawler::PageConverter;
use crate::error::AppError;
use crate::output::paths::page_file_path;
use crate::output::{
    deliver, download_assets, substitute_placeholders, AssetSource, DeliveryTarget, OutputPlan,
};
use crate::types::BlockId;
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Totals for a finished export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub pages_written: usize,
    pub images_saved: usize,
    /// Images whose download failed and are linked remotely instead.
    pub images_remote: usize,
    pub bytes_written: usize,
}

/// Drives conversion and delivery for a page tree.
pub struct ExportPipeline {
    converter: PageConverter,
    assets: Arc<dyn AssetSource>,
}

impl ExportPipeline {
    pub fn new(converter: PageConverter, assets: Arc<dyn AssetSource>) -> Self {
        Self { converter, assets }
    }

    /// Exports `root` and all of its child pages into `output_dir`.
    pub async fn export(&self, root: &BlockId, output_dir: &Path) -> Result<ExportSummary, AppError> {
        let title = self.converter.resolve_title(root).await?;
        log::info!("Exporting page '{}' ({}) to {}", title, root, output_dir.display());

        let mut summary = ExportSummary::default();
        self.export_page(root, title, output_dir.to_path_buf(), &mut summary)
            .await?;
        Ok(summary)
    }

    fn export_page<'a>(
        &'a self,
        page_id: &'a BlockId,
        title: String,
        page_dir: PathBuf,
        summary: &'a mut ExportSummary,
    ) -> BoxFuture<'a, Result<(), AppError>> {
        Box::pin(async move {
            let ctx = self.converter.convert_page(page_id, &title).await?;

            let assets = download_assets(ctx.images(), self.assets.as_ref(), &page_dir).await;
            let document = substitute_placeholders(&ctx.render_document(), &assets);

            let mut plan = OutputPlan::new()
                .with_operation(DeliveryTarget::CreateDirectory {
                    path: page_dir.clone(),
                })
                .with_operation(DeliveryTarget::WriteFile {
                    path: page_file_path(&page_dir),
                    content: document,
                });
            for asset in assets {
                match asset.file {
                    Some((path, bytes)) => {
                        summary.images_saved += 1;
                        plan = plan.with_operation(DeliveryTarget::WriteAsset { path, bytes });
                    }
                    None => summary.images_remote += 1,
                }
            }

            let report = deliver(plan);
            if !report.is_success() {
                return Err(AppError::DeliveryFailed {
                    failures: report.failure_messages(),
                });
            }
            summary.pages_written += 1;
            summary.bytes_written += report.stats.bytes_written;

            for (child_id, child) in ctx.child_pages() {
                let child_dir = page_dir.join(&child.dir_name);
                self.export_page(child_id, child.title.clone(), child_dir, summary)
                    .await?;
            }
            Ok(())
        })
    }
}
