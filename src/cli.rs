//! Command-line interface definitions and argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Market basket analysis CLI for retail transaction logs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file
    #[arg(short, long, default_value = "transactions.csv")]
    pub input: PathBuf,

    /// Directory for the rendered chart PNGs
    #[arg(short, long, default_value = "charts")]
    pub output_dir: PathBuf,

    /// Number of top products to chart
    #[arg(long, default_value = "15")]
    pub top_products: usize,

    /// Number of top co-purchased product pairs to chart
    #[arg(long, default_value = "10")]
    pub top_pairs: usize,

    /// Number of top customers to chart
    #[arg(long, default_value = "15")]
    pub top_customers: usize,

    /// Print the console summary only, skip chart rendering
    #[arg(short, long)]
    pub summary: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Validate top-N cutoffs before the pipeline runs
    pub fn validate(&self) -> crate::Result<()> {
        if self.top_products == 0 {
            anyhow::bail!("--top-products must be at least 1");
        }
        if self.top_pairs == 0 {
            anyhow::bail!("--top-pairs must be at least 1");
        }
        if self.top_customers == 0 {
            anyhow::bail!("--top-customers must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_args() -> Args {
        Args {
            input: PathBuf::from("test.csv"),
            output_dir: PathBuf::from("out"),
            top_products: 15,
            top_pairs: 10,
            top_customers: 15,
            summary: false,
            verbose: false,
        }
    }

    #[test]
    fn test_validate() {
        let mut args = test_args();
        assert!(args.validate().is_ok());

        args.top_products = 0;
        assert!(args.validate().is_err());

        args.top_products = 15;
        args.top_pairs = 0;
        assert!(args.validate().is_err());

        args.top_pairs = 10;
        args.top_customers = 0;
        assert!(args.validate().is_err());
    }
}
