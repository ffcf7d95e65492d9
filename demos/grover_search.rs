//! Example: Grover search over a 3-qubit space.
//! Builds the plan for a marked state, prints the iteration diagnostics and
//! the plan's gate counts, then samples it and reports whether the marked
//! state came out on top.

use grover::{adaptive_iterations, build_search_plan, optimal_iterations, Sampler, SearchConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let num_qubits = 3;
    let marked_state = "101";
    let shots = 1024;

    println!("--- Running Grover's Algorithm ---");
    println!("Number of qubits: {}", num_qubits);
    println!("Marked state: |{}>", marked_state);
    println!("Optimal number of iterations: {}", optimal_iterations(num_qubits, 1)?);
    println!(
        "Adaptive iterations (threshold 0.8): {}",
        adaptive_iterations(num_qubits, [marked_state], 0.8, None)?
    );

    let config = SearchConfig::new(num_qubits, [marked_state]).with_shots(shots);
    let plan = build_search_plan(&config)?;
    println!("\n{}", plan);
    println!("Circuit Performance Metrics:");
    println!("- Depth: {}", plan.depth());
    for (op, count) in plan.operation_counts() {
        println!("- {}: {}", op, count);
    }

    println!("\nSimulating circuit with {} shots...", shots);
    let result = Sampler::new().run(&plan, shots)?;
    println!("\n{}", result);

    match result.most_frequent() {
        Some((label, _)) if label == marked_state => {
            println!("Success! The marked state |{}> was found with highest probability.", marked_state)
        }
        Some((label, _)) => println!("Marked state |{}> was not the most frequent outcome ({}).", marked_state, label),
        None => println!("No outcomes recorded."),
    }
    Ok(())
}
