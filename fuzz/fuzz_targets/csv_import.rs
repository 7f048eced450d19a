#![no_main]

use libfuzzer_sys::fuzz_target;
use pareto::dataset::Dataset;
use pareto::import::read_csv;
use pareto::ParetoAnalysis;

fuzz_target!(|data: &[u8]| {
    let Ok(rows) = read_csv(data) else {
        return;
    };

    // Anything that imports must also analyze
    let mut dataset = Dataset::new();
    if dataset.import_batch(&rows).is_ok() && !dataset.is_empty() {
        let analysis = ParetoAnalysis::compute(dataset.records(), 0.8).unwrap();
        assert!(analysis.top_count() >= 1);
    }
});
