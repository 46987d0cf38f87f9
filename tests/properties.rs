use numerica::{
    domains::{
        float::F64,
        integer::Z,
        rational::{Fraction, Q},
    },
    error::ErrorCode,
    options::{EliminationOptions, Tolerance},
    tensors::{
        helpers::{identity, random_with_rng},
        matrix::Matrix,
        vector::Vector,
    },
};
use rand::{rngs::StdRng, SeedableRng};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(1337)
}

const SHAPES: [(usize, usize); 6] = [(1, 1), (1, 4), (3, 2), (4, 4), (5, 7), (9, 9)];

#[test]
fn shape_classes() {
    let mut rng = rng();
    for (r, c) in SHAPES {
        let m = random_with_rng(r, c, (-5, 5), F64, &mut rng).unwrap();
        assert_eq!(m.size(), r * c);
        assert_eq!(m.data().len(), m.nrows() * m.ncols());

        let classes = [m.is_square(), m.is_tall(), m.is_wide()];
        assert_eq!(classes.iter().filter(|x| **x).count(), 1);

        let t = m.transpose();
        assert_eq!(t.shape().rows, c);
        assert_eq!(t.is_tall(), m.is_wide());
    }
}

#[test]
fn transpose_is_an_involution() {
    let mut rng = rng();
    for (r, c) in SHAPES {
        let m = random_with_rng(r, c, (-100, 100), Q, &mut rng).unwrap();
        assert_eq!(m.transpose().transpose(), m);
    }
}

#[test]
fn add_then_subtract() {
    let mut rng = rng();
    for (r, c) in SHAPES {
        let a = random_with_rng(r, c, (-10, 10), F64, &mut rng).unwrap();
        let b = random_with_rng(r, c, (-10, 10), F64, &mut rng).unwrap();
        assert!(a.add(&b).unwrap().subtract(&b).unwrap().equal(&a));
        assert!(a.add_parallel(&b).unwrap().equal(&a.add(&b).unwrap()));
    }
}

#[test]
fn identity_is_neutral() {
    let mut rng = rng();
    for (r, c) in SHAPES {
        let a = random_with_rng(r, c, (-10, 10), Z, &mut rng).unwrap();
        assert_eq!(a.multiply(&identity(c, Z).unwrap()).unwrap(), a);
        assert_eq!(identity(r, Z).unwrap().multiply(&a).unwrap(), a);
    }
}

#[test]
fn strassen_matches_naive() {
    init();
    let mut rng = rng();
    for n in [1, 2, 3, 4, 8, 9] {
        let a = random_with_rng(n, n, (-20, 20), Z, &mut rng).unwrap();
        let b = random_with_rng(n, n, (-20, 20), Z, &mut rng).unwrap();
        assert_eq!(a.strassen_multiply(&b).unwrap(), a.multiply(&b).unwrap());

        let a = random_with_rng(n, n, (-1, 1), F64, &mut rng).unwrap();
        let b = random_with_rng(n, n, (-1, 1), F64, &mut rng).unwrap();
        let tolerance = Tolerance::new(1e-9);
        assert!(a
            .strassen_multiply(&b)
            .unwrap()
            .equal_with(&a.multiply(&b).unwrap(), &tolerance));
    }

    // non-square operands are padded internally
    let a = random_with_rng(3, 5, (-9, 9), Z, &mut rng).unwrap();
    let b = random_with_rng(5, 2, (-9, 9), Z, &mut rng).unwrap();
    let c = a.strassen_multiply(&b).unwrap();
    assert_eq!(c.shape().to_string(), "(3,2)");
    assert_eq!(c, a.multiply(&b).unwrap());
}

#[test]
fn gauss_jordan_is_idempotent() {
    let mut rng = rng();
    for (r, c) in SHAPES {
        let a = random_with_rng(r, c, (-5, 5), Q, &mut rng).unwrap();
        let once = a
            .gauss_jordan(&EliminationOptions::reduce())
            .unwrap()
            .into_matrix()
            .unwrap();
        let twice = once
            .gauss_jordan(&EliminationOptions::reduce())
            .unwrap()
            .into_matrix()
            .unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn inverse_roundtrip() {
    init();
    let mut rng = rng();
    for n in 1..7 {
        let a = random_with_rng(n, n, (-10, 10), Q, &mut rng).unwrap();
        match a.invert_square() {
            Ok(inv) => {
                assert_eq!(a.multiply(&inv).unwrap(), identity(n, Q).unwrap());
                assert_eq!(inv.multiply(&a).unwrap(), identity(n, Q).unwrap());
            }
            Err(e) => assert_eq!(e.code, ErrorCode::Unsolvable),
        }

        let f = random_with_rng(n, n, (-10, 10), F64, &mut rng).unwrap();
        if let Ok(inv) = f.invert_square() {
            assert!(f
                .multiply(&inv)
                .unwrap()
                .equal_with(&identity(n, F64).unwrap(), &Tolerance::new(1e-8)));
        }
    }
}

#[test]
fn qr_reconstructs() {
    let mut rng = rng();
    for (r, c) in [(2, 2), (4, 3), (6, 6)] {
        let mut a = random_with_rng(r, c, (-10, 10), F64, &mut rng).unwrap();
        let (q, rr) = a.qr_decomposition().unwrap();

        assert!(rr.is_upper_triangular());
        let tolerance = Tolerance::new(1e-9);
        assert!(q.multiply(&rr).unwrap().equal_with(&a, &tolerance));
        assert!(q
            .transpose()
            .multiply(&q)
            .unwrap()
            .equal_with(&identity(c, F64).unwrap(), &tolerance));
    }
}

fn solve_both_ways(system: &Matrix<Q>) -> Vector<Q> {
    let x = system
        .gaussian_elimination(&EliminationOptions::solve())
        .unwrap()
        .into_solution()
        .unwrap();
    let y = system
        .gauss_jordan(&EliminationOptions::solve())
        .unwrap()
        .into_solution()
        .unwrap();
    assert_eq!(x, y);
    x
}

#[test]
fn elimination_solvers_agree() {
    let mut rng = rng();

    // diagonally dominant, hence invertible
    let a = random_with_rng(5, 5, (-9, 9), Q, &mut rng)
        .unwrap()
        .add(&identity(5, Q).unwrap().mul_scalar(&Fraction::from(50)))
        .unwrap();
    let b = random_with_rng(5, 1, (-9, 9), Q, &mut rng).unwrap();
    let system = a.augment(&b).unwrap();

    let x = solve_both_ways(&system);
    assert_eq!(a.multiply(&x.clone().into_matrix()).unwrap(), b);

    // an extra equation that is the sum of the first two
    let extra = system
        .get_row(0)
        .unwrap()
        .add(&system.get_row(1).unwrap())
        .unwrap();
    let mut rows: Vec<Vec<Fraction>> = system.row_iter().map(|r| r.to_vec()).collect();
    rows.push(extra.data().to_vec());
    let tall = Matrix::from_nested_vec(rows, Q).unwrap();
    assert_eq!(tall.nrows(), 6);
    assert_eq!(solve_both_ways(&tall), x);
}
