use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use super::model::Table;

// ---------------------------------------------------------------------------
// Scalar elementwise arithmetic on float tables
// ---------------------------------------------------------------------------

/// Scalar operation applied to every element of a float table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarOp {
    Add(f32),
    Sub(f32),
    Mul(f32),
    Div(f32),
}

impl ScalarOp {
    pub fn apply(self, value: f32) -> f32 {
        match self {
            ScalarOp::Add(s) => value + s,
            ScalarOp::Sub(s) => value - s,
            ScalarOp::Mul(s) => value * s,
            ScalarOp::Div(s) => value / s,
        }
    }
}

impl Table<f32> {
    /// Apply `op` to every element in place.  Returns `self` for chaining.
    pub fn apply(&mut self, op: ScalarOp) -> &mut Self {
        for v in self.data_mut() {
            *v = op.apply(*v);
        }
        self
    }

    pub fn add_scalar(&mut self, s: f32) -> &mut Self {
        self.apply(ScalarOp::Add(s))
    }

    pub fn sub_scalar(&mut self, s: f32) -> &mut Self {
        self.apply(ScalarOp::Sub(s))
    }

    pub fn mul_scalar(&mut self, s: f32) -> &mut Self {
        self.apply(ScalarOp::Mul(s))
    }

    pub fn div_scalar(&mut self, s: f32) -> &mut Self {
        self.apply(ScalarOp::Div(s))
    }
}

impl AddAssign<f32> for Table<f32> {
    fn add_assign(&mut self, s: f32) {
        self.add_scalar(s);
    }
}

impl SubAssign<f32> for Table<f32> {
    fn sub_assign(&mut self, s: f32) {
        self.sub_scalar(s);
    }
}

impl MulAssign<f32> for Table<f32> {
    fn mul_assign(&mut self, s: f32) {
        self.mul_scalar(s);
    }
}

impl DivAssign<f32> for Table<f32> {
    fn div_assign(&mut self, s: f32) {
        self.div_scalar(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table<f32> {
        Table::from_rows(&[vec![1.0, -2.5, 3.0], vec![0.0, 10.0, 0.125]]).unwrap()
    }

    fn close(a: &[f32], b: &[f32]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn each_op_hits_every_element() {
        let orig = table();
        for op in [
            ScalarOp::Add(1.5),
            ScalarOp::Sub(0.5),
            ScalarOp::Mul(2.0),
            ScalarOp::Div(4.0),
        ] {
            let mut t = orig.clone();
            t.apply(op);
            let expected: Vec<f32> = orig.data().iter().map(|&v| op.apply(v)).collect();
            assert_eq!(t.data(), expected.as_slice());
            assert_eq!((t.rows(), t.cols()), (orig.rows(), orig.cols()));
        }
    }

    #[test]
    fn inverse_ops_restore_values() {
        let orig = table();
        let mut t = orig.clone();
        t.add_scalar(0.3).sub_scalar(0.3);
        assert!(close(t.data(), orig.data()));

        t.mul_scalar(7.0).div_scalar(7.0);
        assert!(close(t.data(), orig.data()));
    }

    #[test]
    fn assign_operators() {
        let mut t = table();
        t *= 2.0;
        t -= 1.0;
        assert_eq!(t.data()[0], 1.0);
        assert_eq!(t.data()[4], 19.0);
        t += 1.0;
        t /= 2.0;
        assert!(close(t.data(), table().data()));
    }
}
