use serde::{Deserialize, Serialize};
use serde_derive::{Deserialize, Serialize};
use std::marker::PhantomData;

use crate::error::Error;

pub trait BBoxFormat: std::fmt::Debug {}

/// Left-top-right-bottom format, contains left top and right bottom corners
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Ltrb;
impl BBoxFormat for Ltrb {}

/// Left-top-width-height format, contains left top corner and width-height
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Ltwh;
impl BBoxFormat for Ltwh {}

/// Axis-aligned box tagged with its coordinate format. The format is
/// carried by the type parameter, never inferred from the values.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct BBox<F: BBoxFormat + Serialize + Deserialize<'static> + PartialEq>(
    [f32; 4],
    PhantomData<F>,
);

impl<F: BBoxFormat + Serialize + Deserialize<'static> + PartialEq> From<BBox<F>> for [f32; 4] {
    fn from(bbox: BBox<F>) -> Self {
        bbox.0
    }
}

impl<F: BBoxFormat + Serialize + Deserialize<'static> + PartialEq> BBox<F> {
    #[inline]
    pub fn as_slice(&self) -> &[f32; 4] {
        &self.0
    }

    // Use carefully when you REALLY sure that slice have needed format
    #[inline(always)]
    pub fn assigned(slice: &[f32; 4]) -> Self {
        BBox(*slice, Default::default())
    }
}

impl BBox<Ltrb> {
    #[inline]
    pub fn ltrb(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        BBox([x1, y1, x2, y2], Default::default())
    }

    #[inline]
    pub fn as_ltwh(&self) -> BBox<Ltwh> {
        self.into()
    }

    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn right(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn bottom(&self) -> f32 {
        self.0[3]
    }

    #[inline]
    pub fn area(&self) -> f32 {
        (self.right() - self.left()) * (self.bottom() - self.top())
    }

    fn checked_area(&self) -> Result<f32, Error> {
        let area = self.area();
        if area > 0.0 {
            Ok(area)
        } else {
            Err(Error::DegenerateBBox(self.0))
        }
    }

    #[inline]
    fn intersection(&self, other: &BBox<Ltrb>) -> f32 {
        let x1 = self.left().max(other.left());
        let y1 = self.top().max(other.top());
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        (x2 - x1).max(0.0) * (y2 - y1).max(0.0)
    }

    /// Intersection over union. Degenerate inputs are a caller contract
    /// violation and fail fast instead of dividing by zero.
    pub fn iou(&self, other: &BBox<Ltrb>) -> Result<f32, Error> {
        let a1 = self.checked_area()?;
        let a2 = other.checked_area()?;
        let i = self.intersection(other);

        Ok(i / (a1 + a2 - i))
    }

    /// Intersection over the area of `other` only. Asymmetric,
    /// containment-style measure.
    pub fn ioa(&self, other: &BBox<Ltrb>) -> Result<f32, Error> {
        self.checked_area()?;
        let a2 = other.checked_area()?;

        Ok(self.intersection(other) / a2)
    }
}

impl BBox<Ltwh> {
    #[inline]
    pub fn ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        BBox([left, top, width, height], Default::default())
    }

    #[inline]
    pub fn as_ltrb(&self) -> BBox<Ltrb> {
        self.into()
    }

    #[inline(always)]
    pub fn left(&self) -> f32 {
        self.0[0]
    }

    #[inline(always)]
    pub fn top(&self) -> f32 {
        self.0[1]
    }

    #[inline(always)]
    pub fn width(&self) -> f32 {
        self.0[2]
    }

    #[inline(always)]
    pub fn height(&self) -> f32 {
        self.0[3]
    }

    #[inline]
    pub fn iou(&self, other: &BBox<Ltwh>) -> Result<f32, Error> {
        self.as_ltrb().iou(&other.as_ltrb())
    }

    #[inline]
    pub fn ioa(&self, other: &BBox<Ltwh>) -> Result<f32, Error> {
        self.as_ltrb().ioa(&other.as_ltrb())
    }
}

impl<'a> From<&'a BBox<Ltwh>> for BBox<Ltrb> {
    #[inline]
    fn from(v: &'a BBox<Ltwh>) -> Self {
        Self(
            [v.0[0], v.0[1], v.0[2] + v.0[0], v.0[3] + v.0[1]],
            Default::default(),
        )
    }
}

impl<'a> From<&'a BBox<Ltrb>> for BBox<Ltwh> {
    #[inline]
    fn from(v: &'a BBox<Ltrb>) -> Self {
        Self(
            [v.0[0], v.0[1], v.0[2] - v.0[0], v.0[3] - v.0[1]],
            Default::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iou_of_box_with_itself_is_one() {
        let b = BBox::ltrb(10.0, 20.0, 110.0, 80.0);
        assert_eq!(b.iou(&b).unwrap(), 1.0);
    }

    #[test]
    fn iou_is_symmetric_and_bounded() {
        let a = BBox::ltrb(0.0, 0.0, 100.0, 100.0);
        let b = BBox::ltrb(50.0, 50.0, 150.0, 150.0);

        let ab = a.iou(&b).unwrap();
        let ba = b.iou(&a).unwrap();

        assert_eq!(ab, ba);
        assert!(ab > 0.0 && ab < 1.0);
        // 50x50 intersection over 2*100x100 - 2500 union
        assert!((ab - 2500.0 / 17500.0).abs() < 1e-6);
    }

    #[test]
    fn disjoint_boxes_have_zero_iou() {
        let a = BBox::ltrb(0.0, 0.0, 10.0, 10.0);
        let b = BBox::ltrb(20.0, 20.0, 30.0, 30.0);

        assert_eq!(a.iou(&b).unwrap(), 0.0);
    }

    #[test]
    fn degenerate_box_fails_fast() {
        let good = BBox::ltrb(0.0, 0.0, 10.0, 10.0);
        let flat = BBox::ltrb(5.0, 5.0, 5.0, 9.0);
        let inverted = BBox::ltrb(10.0, 10.0, 0.0, 20.0);

        assert!(matches!(
            good.iou(&flat),
            Err(Error::DegenerateBBox(_))
        ));
        assert!(matches!(
            inverted.iou(&good),
            Err(Error::DegenerateBBox(_))
        ));
        assert!(matches!(
            good.ioa(&flat),
            Err(Error::DegenerateBBox(_))
        ));
    }

    #[test]
    fn ioa_is_asymmetric() {
        // b sits fully inside a
        let a = BBox::ltrb(0.0, 0.0, 100.0, 100.0);
        let b = BBox::ltrb(25.0, 25.0, 75.0, 75.0);

        assert_eq!(a.ioa(&b).unwrap(), 1.0);
        assert_eq!(b.ioa(&a).unwrap(), 0.25);
    }

    #[test]
    fn ltwh_converts_to_ltrb() {
        let a = BBox::ltwh(10.0, 20.0, 30.0, 40.0);
        assert_eq!(a.as_ltrb(), BBox::ltrb(10.0, 20.0, 40.0, 60.0));
        assert_eq!(a.iou(&a).unwrap(), 1.0);
    }
}
