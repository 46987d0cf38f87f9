use numerica::{
    domains::rational::{Fraction, Q},
    options::EliminationOptions,
    tensors::matrix::Matrix,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // x + 2y - z = 2, 2x - y + 3z = 9, 3x + y + z = 8
    let system = Matrix::from_nested_vec(
        vec![
            vec![1, 2, -1, 2],
            vec![2, -1, 3, 9],
            vec![3, 1, 1, 8],
        ]
        .into_iter()
        .map(|r| r.into_iter().map(Fraction::from).collect())
        .collect(),
        Q,
    )
    .unwrap();

    println!("System: {}", system);

    let echelon = system
        .gaussian_elimination(&EliminationOptions::reduce())
        .unwrap()
        .into_matrix()
        .unwrap();
    println!("Row echelon form: {}", echelon);

    match system.gauss_jordan(&EliminationOptions::solve()) {
        Ok(r) => println!("Solution: {}", r.into_solution().unwrap()),
        Err(e) => println!("Could not solve the system: {}", e),
    }

    let a = system.get_sub_matrix(0..3, 0..3).unwrap();
    println!("Inverse of the coefficients: {}", a.invert_square().unwrap());
}
