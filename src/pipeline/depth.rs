//! Depth comparison state

/// Comparison between the depth of an incoming fragment and the depth already stored in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthTest {
    Never,
    Always,
    Less,
    Greater,
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
}

impl Default for DepthTest {
    fn default() -> DepthTest { DepthTest::Less }
}

impl DepthTest {
    /// Returns true if the candidate fragment should replace the current one.
    ///
    /// Candidates outside of `[0, 1]` always fail, whatever the comparator.
    #[inline]
    pub fn compare(self, candidate: f32, current: f32) -> bool {
        if !(0.0..=1.0).contains(&candidate) {
            return false;
        }

        match self {
            DepthTest::Never => false,
            DepthTest::Always => true,
            DepthTest::Less => candidate < current,
            DepthTest::Greater => candidate > current,
            DepthTest::Equal => candidate == current,
            DepthTest::NotEqual => candidate != current,
            DepthTest::LessEqual => candidate <= current,
            DepthTest::GreaterEqual => candidate >= current,
        }
    }
}

/// Depth configuration of a pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthState {
    pub test: DepthTest,
    /// When disabled, every fragment passes and the depth buffer is left untouched
    pub enabled: bool,
    /// Selects late depth testing, where the fragment shader runs before the test and may replace the depth.
    ///
    /// Shaders that can return [`Fragment::Discard`](super::Fragment::Discard) should also set this, because
    /// early testing writes the depth before the shader gets to run.
    pub fragment_shader_writes_depth: bool,
}

impl Default for DepthState {
    fn default() -> DepthState {
        DepthState {
            test: DepthTest::Less,
            enabled: true,
            fragment_shader_writes_depth: false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const ALL: [DepthTest; 8] = [
        DepthTest::Never, DepthTest::Always, DepthTest::Less, DepthTest::Greater,
        DepthTest::Equal, DepthTest::NotEqual, DepthTest::LessEqual, DepthTest::GreaterEqual,
    ];

    #[test]
    fn test_equal_depths() {
        let passing: Vec<DepthTest> = ALL.iter().cloned().filter(|test| test.compare(0.5, 0.5)).collect();

        assert_eq!(passing, vec![DepthTest::Always, DepthTest::Equal, DepthTest::LessEqual, DepthTest::GreaterEqual]);
    }

    #[test]
    fn test_ordering() {
        assert!(DepthTest::Less.compare(0.25, 0.5));
        assert!(!DepthTest::Less.compare(0.75, 0.5));
        assert!(DepthTest::Greater.compare(0.75, 0.5));
        assert!(DepthTest::NotEqual.compare(0.75, 0.5));
        assert!(!DepthTest::GreaterEqual.compare(0.25, 0.5));
    }

    #[test]
    fn test_out_of_range_always_fails() {
        for test in ALL.iter() {
            assert!(!test.compare(-0.001, 0.5), "{:?}", test);
            assert!(!test.compare(1.5, 0.5), "{:?}", test);
            assert!(!test.compare(f32::NAN, 0.5), "{:?}", test);
        }

        assert!(DepthTest::Always.compare(0.0, 0.5));
        assert!(DepthTest::Always.compare(1.0, 0.5));
    }
}
