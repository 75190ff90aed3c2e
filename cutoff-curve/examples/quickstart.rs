//! Find the best cut-off for a small held-out evaluation set.

use cutoff_core::Result;
use cutoff_curve::{CostGainMatrix, CutoffCalculator, PlotConfig};

fn main() -> Result<()> {
    let labels: Vec<u8> = vec![1, 1, 0, 1, 0, 0, 1, 0];
    let scores = vec![0.9, 0.7, 0.6, 0.75, 0.5, 0.3, 0.8, 0.2];

    // each true positive earns 10, each false positive costs 5
    let mut calc = CutoffCalculator::new(labels, scores, CostGainMatrix::new(10.0, 5.0));
    calc.generate_net_gain_curve()?.find_optimal_cutoff()?;

    println!("{:>10}  {:>10}", "cut-off", "net gain");
    for (threshold, gain) in calc.curve()?.pairs() {
        println!("{threshold:>10.3}  {gain:>10.3}");
    }

    let plot = calc.plot(&PlotConfig::default())?;
    println!("{}", plot.title);
    println!("{}", plot.annotation.text);
    Ok(())
}
