use std::fmt;

/// A `start:stop:step` selection over an array, each bound optional.
/// Negative bounds count from the end of the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SliceSpec {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl SliceSpec {
    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }

    /// Parses `start:stop` or `start:stop:step`. The text must contain at
    /// least one colon and at most two.
    pub fn parse(text: &str) -> Option<Self> {
        if !text.contains(':') {
            return None;
        }
        let mut fields = text.split(':');
        let start = parse_bound(fields.next()?)?;
        let stop = parse_bound(fields.next()?)?;
        let step = match fields.next() {
            Some(raw) => parse_bound(raw)?,
            None => None,
        };
        if fields.next().is_some() {
            return None;
        }
        Some(Self { start, stop, step })
    }

    /// The element positions selected from an array of `len` elements, in
    /// selection order. `None` when the step is zero.
    pub fn indices(&self, len: usize) -> Option<Vec<usize>> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return None;
        }
        let len = len as i64;
        let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };
        let clamp = |bound: i64| {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };
        let start = self
            .start
            .map(clamp)
            .unwrap_or(if step > 0 { lower } else { upper });
        let stop = self
            .stop
            .map(clamp)
            .unwrap_or(if step > 0 { upper } else { lower });

        let mut out = Vec::new();
        let mut idx = start;
        while (step > 0 && idx < stop) || (step < 0 && idx > stop) {
            out.push(idx as usize);
            match idx.checked_add(step) {
                Some(next) => idx = next,
                None => break,
            }
        }
        Some(out)
    }

    /// The contiguous `start..stop` range a unit-step slice covers, used to
    /// splice replacement elements in.
    pub fn range(&self, len: usize) -> Option<std::ops::Range<usize>> {
        if self.step.unwrap_or(1) != 1 {
            return None;
        }
        let len = len as i64;
        let clamp = |bound: i64| {
            if bound < 0 {
                (bound + len).max(0)
            } else {
                bound.min(len)
            }
        };
        let start = self.start.map(clamp).unwrap_or(0);
        let stop = self.stop.map(clamp).unwrap_or(len).max(start);
        Some(start as usize..stop as usize)
    }
}

fn parse_bound(raw: &str) -> Option<Option<i64>> {
    if raw.is_empty() {
        return Some(None);
    }
    raw.parse::<i64>().ok().map(Some)
}

impl fmt::Display for SliceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        f.write_str(":")?;
        if let Some(stop) = self.stop {
            write!(f, "{stop}")?;
        }
        if let Some(step) = self.step {
            write!(f, ":{step}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1:", Some(1), None, None)]
    #[case(":2", None, Some(2), None)]
    #[case("::2", None, None, Some(2))]
    #[case("-2:", Some(-2), None, None)]
    #[case("1:5:-1", Some(1), Some(5), Some(-1))]
    fn test_parse(
        #[case] text: &str,
        #[case] start: Option<i64>,
        #[case] stop: Option<i64>,
        #[case] step: Option<i64>,
    ) {
        assert_eq!(SliceSpec::parse(text), Some(SliceSpec::new(start, stop, step)));
    }

    #[rstest]
    #[case("1")]
    #[case("1:2:3:4")]
    #[case("a:b")]
    #[case("--1:")]
    fn test_parse_rejects(#[case] text: &str) {
        assert_eq!(SliceSpec::parse(text), None);
    }

    #[rstest]
    fn test_indices_follow_python_semantics() {
        let spec = |text: &str| SliceSpec::parse(text).expect("slice");
        assert_eq!(spec("1:").indices(3), Some(vec![1, 2]));
        assert_eq!(spec(":2").indices(3), Some(vec![0, 1]));
        assert_eq!(spec("::2").indices(5), Some(vec![0, 2, 4]));
        assert_eq!(spec("::-1").indices(3), Some(vec![2, 1, 0]));
        assert_eq!(spec("-2:").indices(3), Some(vec![1, 2]));
        assert_eq!(spec("5:9").indices(3), Some(vec![]));
        assert_eq!(spec("::0").indices(3), None);
    }

    #[rstest]
    #[case("1::9223372036854775807", vec![1])]
    #[case("::9223372036854775807", vec![0])]
    #[case("::-9223372036854775808", vec![2])]
    #[case("-9223372036854775808:9223372036854775807", vec![0, 1, 2])]
    fn test_indices_with_extreme_bounds(#[case] text: &str, #[case] expected: Vec<usize>) {
        let spec = SliceSpec::parse(text).expect("slice");
        assert_eq!(spec.indices(3), Some(expected));
    }

    #[rstest]
    fn test_range() {
        let spec = |text: &str| SliceSpec::parse(text).expect("slice");
        assert_eq!(spec("1:2").range(3), Some(1..2));
        assert_eq!(spec("3:1").range(5), Some(3..3));
        assert_eq!(spec("-1:").range(4), Some(3..4));
        assert_eq!(spec("::2").range(4), None);
    }

    #[rstest]
    fn test_display() {
        assert_eq!(SliceSpec::new(Some(1), Some(2), None).to_string(), "1:2");
        assert_eq!(SliceSpec::new(None, None, Some(-1)).to_string(), "::-1");
    }
}
