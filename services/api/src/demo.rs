use clap::Args;
use name_match::error::AppError;
use name_match::matching::NameMatcher;

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Left-hand name (e.g. the submitted form value)
    #[arg(long)]
    pub(crate) left: String,
    /// Right-hand name (e.g. the canonical contact record)
    #[arg(long)]
    pub(crate) right: String,
    /// Disable German digraph folding (ae/oe/ue)
    #[arg(long)]
    pub(crate) no_fold: bool,
    /// Print the normalized forms alongside the score
    #[arg(long)]
    pub(crate) show_normalized: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Disable German digraph folding (ae/oe/ue)
    #[arg(long)]
    pub(crate) no_fold: bool,
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let CompareArgs {
        left,
        right,
        no_fold,
        show_normalized,
    } = args;

    let matcher = NameMatcher::new(!no_fold);
    let comparison = matcher.compare(Some(&left), Some(&right));

    println!("Similarity: {:.3}", comparison.score);
    if show_normalized {
        println!(
            "Normalized: '{}' | '{}'",
            comparison.normalized_left, comparison.normalized_right
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let fold = !args.no_fold;
    let matcher = NameMatcher::new(fold);

    println!("Name match demo");
    println!("German digraph folding: {}", if fold { "on" } else { "off" });

    let samples: [(Option<&str>, Option<&str>, &str); 6] = [
        (
            Some("Jürgen Müller"),
            Some("Juergen Mueller"),
            "umlauts vs typed transliteration",
        ),
        (Some("Anna"), Some("Ana"), "single-letter typo"),
        (Some("Schmidt"), Some("Schmid"), "truncated surname"),
        (Some("José García"), Some("Jose Garcia"), "accent stripping"),
        (Some("Aer"), Some("Ar"), "accepted folding false positive"),
        (None, Some(""), "absent against empty field"),
    ];

    println!("\nSample reconciliations");
    for (left, right, label) in samples {
        let comparison = matcher.compare(left, right);
        println!(
            "- {:?} vs {:?} -> {:.3} ({})",
            left.unwrap_or(""),
            right.unwrap_or(""),
            comparison.score,
            label
        );
        println!(
            "  normalized: '{}' | '{}'",
            comparison.normalized_left, comparison.normalized_right
        );
    }

    Ok(())
}
