use chrono::NaiveDate;
use tracing::Level;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::models::{DateRange, ProductKind, ProductMetadata, ScreenRule};
use crate::processors::{fill_missing_dates, RadiometerScreener, SatelliteScreener};
use crate::readers::{RadiometerReader, SatelliteReader};
use crate::utils::constants::RULE_EXTENSION;
use crate::utils::filename::satellite_product_name;
use crate::utils::progress::ProgressReporter;
use crate::writers::artifact::{load_dataset, load_daterange, load_metadata};
use crate::writers::ArtifactWriter;

pub fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    // Artifact directories are owned by this layer, never by the core
    std::fs::create_dir_all(&cli.export_dir)?;
    std::fs::create_dir_all(&cli.output_dir)?;

    match cli.command {
        Commands::Radiometer {
            root,
            validate_only,
        } => {
            println!("Processing radiometer data from {}", root.display());

            let reader = RadiometerReader::new(&root);
            let progress = ProgressReporter::new_spinner("Finding files with retrievals...", false);
            let files = reader.find_retrievals(Some(&progress))?;
            progress.finish_with_message(&format!("Found {} retrieval files", files.len()));

            if validate_only {
                println!("Validation complete - no artifacts written");
                return Ok(());
            }

            let progress =
                ProgressReporter::new(files.len() as u64, "Extracting products...", false);
            let dataset = reader.extract_products(&files, Some(&progress))?;
            progress.finish_with_message("Extraction complete");

            let range = load_daterange(&cli.export_dir)?;
            let dataset = fill_missing_dates(dataset, &range)?;
            let metadata = ProductMetadata::new(ProductKind::Radiometer, files);

            let writer = ArtifactWriter::new(&cli.export_dir);
            let (dataset_path, _) =
                writer.write_dataset(ProductKind::Radiometer.tag(), &dataset, &metadata)?;
            println!(
                "Saved {} records to {}",
                dataset.len(),
                dataset_path.display()
            );
        }

        Commands::Satellite {
            root,
            product,
            radius,
            validate_only,
        } => {
            let product = ProductKind::from_tag(&product)?;
            println!(
                "Processing satellite {} data from {}",
                product,
                root.display()
            );

            let reader = SatelliteReader::new(&root, product, radius as f64)?;
            let files = reader.find_sources()?;
            println!("Found {} swath files", files.len());

            if validate_only {
                println!("Validation complete - no artifacts written");
                return Ok(());
            }

            let progress = ProgressReporter::new(
                files.len() as u64,
                &format!("Extracting {} samples within {} km...", product, radius),
                false,
            );
            let dataset = reader.extract_products(&files, Some(&progress))?;
            progress.finish_with_message("Extraction complete");

            let range = load_daterange(&cli.export_dir)?;
            let dataset = fill_missing_dates(dataset, &range)?;
            let metadata = ProductMetadata::new(product, files);

            let writer = ArtifactWriter::new(&cli.export_dir);
            let name = satellite_product_name(product.tag(), radius);
            let (dataset_path, _) = writer.write_dataset(&name, &dataset, &metadata)?;
            println!(
                "Saved {} records to {}",
                dataset.len(),
                dataset_path.display()
            );
        }

        Commands::Screen {
            dataset,
            filename,
            winter,
        } => {
            let export = ArtifactWriter::new(&cli.export_dir);
            let (dataset_path, metadata_path) = export.find_product_artifacts(&dataset)?;
            let data = load_dataset(&dataset_path)?;
            let metadata = load_metadata(&metadata_path)?;
            println!(
                "Screening {} dataset with {} records",
                metadata.product,
                data.len()
            );

            let rule_path = cli
                .data_dir
                .join(format!("{}.{}", metadata.product.tag(), RULE_EXTENSION));
            let rule = ScreenRule::load(&rule_path)?;
            rule.verify_product(&metadata)?;

            let output = ArtifactWriter::new(&cli.output_dir);
            if metadata.product.is_satellite() {
                let range = load_daterange(&cli.export_dir)?;
                let screener = SatelliteScreener::new(&data, &rule);
                let retained = screener.screen(winter || rule.winter)?;
                println!("Retained {} of {} records", retained.len(), data.len());

                let filled = fill_missing_dates(retained, &range)?;
                let path = output.write_screened(&filename, &filled)?;
                println!("Screened dataset saved to {}", path.display());
            } else {
                let screener = RadiometerScreener::new(&data, &rule);
                let passed = screener.screen();
                let path = output.write_screened(&filename, &passed)?;
                println!("Dataset passed through unfiltered to {}", path.display());
            }
        }

        Commands::Daterange { start, end } => {
            let start = NaiveDate::parse_from_str(&start, "%Y-%m-%d")?;
            let end = NaiveDate::parse_from_str(&end, "%Y-%m-%d")?;
            let range = DateRange::from_bounds(start, end)?;

            let writer = ArtifactWriter::new(&cli.export_dir);
            let path = writer.write_daterange(&range)?;
            println!(
                "Reference date range with {} dates saved to {}",
                range.len(),
                path.display()
            );
        }
    }

    Ok(())
}
