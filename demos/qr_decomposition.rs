use numerica::{
    domains::float::F64,
    options::Tolerance,
    tensors::{helpers, matrix::Matrix},
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut a = Matrix::<F64>::from_rows(vec![
        vec![12., -51., 4.],
        vec![6., 167., -68.],
        vec![-4., 24., -41.],
    ])
    .unwrap();

    let (q, r) = a.qr_decomposition().unwrap();
    println!("Q = {}", q);
    println!("R = {}", r);

    let mut qr = q.multiply(&r).unwrap();
    qr.to_fixed(8);
    println!("Q * R = {}", qr);
    println!(
        "Q * R == A: {}",
        qr.equal_with(&a, &Tolerance::new(1e-9))
    );

    let n = q.ncols();
    let qtq = q.transpose().multiply(&q).unwrap();
    println!(
        "Q^T * Q == I: {}",
        qtq.equal_with(&helpers::identity(n, F64).unwrap(), &Tolerance::new(1e-9))
    );
}
