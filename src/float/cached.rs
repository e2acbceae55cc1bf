//! Precomputed powers of ten in [`Fp`] form.
//!
//! `POWERS_TEN[i]` approximates `10^(FIRST_POWER + i * STEP_POWERS)` with a
//! normalized 64-bit fraction, for decimal exponents -348 through 340.

use super::diy::Fp;

const NPOWERS: i32 = 87;
const STEP_POWERS: i32 = 8;
const FIRST_POWER: i32 = -348;

/// Target window for the binary exponent of a scaled value, chosen so the
/// integral part of the scaled upper boundary fits in 32 bits.
const EXP_MAX: i32 = -32;
const EXP_MIN: i32 = -60;

/// `log10(2)`.
const ONE_LOG_TEN: f64 = 0.30102999566398114;

static POWERS_TEN: [Fp; NPOWERS as usize] = [
  Fp::new(18_054_884_314_459_144_840, -1220),
  Fp::new(13_451_937_075_301_367_670, -1193),
  Fp::new(10_022_474_136_428_063_862, -1166),
  Fp::new(14_934_650_266_808_366_570, -1140),
  Fp::new(11_127_181_549_972_568_877, -1113),
  Fp::new(16_580_792_590_934_885_855, -1087),
  Fp::new(12_353_653_155_963_782_858, -1060),
  Fp::new(18_408_377_700_990_114_895, -1034),
  Fp::new(13_715_310_171_984_221_708, -1007),
  Fp::new(10_218_702_384_817_765_436, -980),
  Fp::new(15_227_053_142_812_498_563, -954),
  Fp::new(11_345_038_669_416_679_861, -927),
  Fp::new(16_905_424_996_341_287_883, -901),
  Fp::new(12_595_523_146_049_147_757, -874),
  Fp::new(9_384_396_036_005_875_287, -847),
  Fp::new(13_983_839_803_942_852_151, -821),
  Fp::new(10_418_772_551_374_772_303, -794),
  Fp::new(15_525_180_923_007_089_351, -768),
  Fp::new(11_567_161_174_868_858_868, -741),
  Fp::new(17_236_413_322_193_710_309, -715),
  Fp::new(12_842_128_665_889_583_758, -688),
  Fp::new(9_568_131_466_127_621_947, -661),
  Fp::new(14_257_626_930_069_360_058, -635),
  Fp::new(10_622_759_856_335_341_974, -608),
  Fp::new(15_829_145_694_278_690_180, -582),
  Fp::new(11_793_632_577_567_316_726, -555),
  Fp::new(17_573_882_009_934_360_870, -529),
  Fp::new(13_093_562_431_584_567_480, -502),
  Fp::new(9_755_464_219_737_475_723, -475),
  Fp::new(14_536_774_485_912_137_811, -449),
  Fp::new(10_830_740_992_659_433_045, -422),
  Fp::new(16_139_061_738_043_178_685, -396),
  Fp::new(12_024_538_023_802_026_127, -369),
  Fp::new(17_917_957_937_422_433_684, -343),
  Fp::new(13_349_918_974_505_688_015, -316),
  Fp::new(9_946_464_728_195_732_843, -289),
  Fp::new(14_821_387_422_376_473_014, -263),
  Fp::new(11_042_794_154_864_902_060, -236),
  Fp::new(16_455_045_573_212_060_422, -210),
  Fp::new(12_259_964_326_927_110_867, -183),
  Fp::new(18_268_770_466_636_286_478, -157),
  Fp::new(13_611_294_676_837_538_539, -130),
  Fp::new(10_141_204_801_825_835_212, -103),
  Fp::new(15_111_572_745_182_864_684, -77),
  Fp::new(11_258_999_068_426_240_000, -50),
  Fp::new(16_777_216_000_000_000_000, -24),
  Fp::new(12_500_000_000_000_000_000, 3),
  Fp::new(9_313_225_746_154_785_156, 30),
  Fp::new(13_877_787_807_814_456_755, 56),
  Fp::new(10_339_757_656_912_845_936, 83),
  Fp::new(15_407_439_555_097_886_824, 109),
  Fp::new(11_479_437_019_748_901_445, 136),
  Fp::new(17_105_694_144_590_052_135, 162),
  Fp::new(12_744_735_289_059_618_216, 189),
  Fp::new(9_495_567_745_759_798_747, 216),
  Fp::new(14_149_498_560_666_738_074, 242),
  Fp::new(10_542_197_943_230_523_224, 269),
  Fp::new(15_709_099_088_952_724_970, 295),
  Fp::new(11_704_190_886_730_495_818, 322),
  Fp::new(17_440_603_504_673_385_349, 348),
  Fp::new(12_994_262_207_056_124_023, 375),
  Fp::new(9_681_479_787_123_295_682, 402),
  Fp::new(14_426_529_090_290_212_157, 428),
  Fp::new(10_748_601_772_107_342_003, 455),
  Fp::new(16_016_664_761_464_807_395, 481),
  Fp::new(11_933_345_169_920_330_789, 508),
  Fp::new(17_782_069_995_880_619_868, 534),
  Fp::new(13_248_674_568_444_952_270, 561),
  Fp::new(9_871_031_767_461_413_346, 588),
  Fp::new(14_708_983_551_653_345_445, 614),
  Fp::new(10_959_046_745_042_015_199, 641),
  Fp::new(16_330_252_207_878_254_650, 667),
  Fp::new(12_166_986_024_289_022_870, 694),
  Fp::new(18_130_221_999_122_236_476, 720),
  Fp::new(13_508_068_024_458_167_312, 747),
  Fp::new(10_064_294_952_495_520_794, 774),
  Fp::new(14_996_968_138_956_309_548, 800),
  Fp::new(11_173_611_982_879_273_257, 827),
  Fp::new(16_649_979_327_439_178_909, 853),
  Fp::new(12_405_201_291_620_119_593, 880),
  Fp::new(9_242_595_204_427_927_429, 907),
  Fp::new(13_772_540_099_066_387_757, 933),
  Fp::new(10_261_342_003_245_940_623, 960),
  Fp::new(15_290_591_125_556_738_113, 986),
  Fp::new(11_392_378_155_556_871_081, 1013),
  Fp::new(16_975_966_327_722_178_521, 1039),
  Fp::new(12_648_080_533_535_911_531, 1066),
];

/// Powers of ten from `10^19` down to `10^0`.
pub(crate) const TENS: [u64; 20] = [
  10_000_000_000_000_000_000,
  1_000_000_000_000_000_000,
  100_000_000_000_000_000,
  10_000_000_000_000_000,
  1_000_000_000_000_000,
  100_000_000_000_000,
  10_000_000_000_000,
  1_000_000_000_000,
  100_000_000_000,
  10_000_000_000,
  1_000_000_000,
  100_000_000,
  10_000_000,
  1_000_000,
  100_000,
  10_000,
  1_000,
  100,
  10,
  1,
];

/// Picks the cached power `c = 10^k` that brings a value with binary
/// exponent `exp` into `[EXP_MIN, EXP_MAX]` after multiplication, and
/// returns it along with `k`.
pub(crate) fn cached_power(exp: i32) -> (Fp, i32) {
  let approx = (f64::from(-(exp + NPOWERS)) * ONE_LOG_TEN) as i32;
  let mut idx = ((approx - FIRST_POWER) / STEP_POWERS) as usize;

  loop {
    let current = exp + POWERS_TEN[idx].exp + 64;
    if current < EXP_MIN {
      idx += 1;
    } else if current > EXP_MAX {
      idx -= 1;
    } else {
      return (POWERS_TEN[idx], FIRST_POWER + idx as i32 * STEP_POWERS);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn table_is_normalized_and_ordered() {
    assert!(POWERS_TEN.iter().all(|p| p.frac & (1 << 63) != 0));
    for pair in POWERS_TEN.windows(2) {
      assert!(pair[0].exp < pair[1].exp);
    }
  }

  #[test]
  fn table_contains_exact_small_powers() {
    // index 44 is 10^4, index 45 is 10^12
    assert_eq!(POWERS_TEN[44], Fp::new(10_000 << 50, -50));
    assert_eq!(POWERS_TEN[45], Fp::new(1_000_000_000_000 << 24, -24));
  }

  #[test]
  fn tens_descend_by_factor_ten() {
    for pair in TENS.windows(2) {
      assert_eq!(pair[0], pair[1] * 10);
    }
    assert_eq!(TENS[19], 1);
  }

  #[test]
  fn scaled_exponent_lands_in_window() {
    for exp in [-1137, -1074, -600, -200, -63, -62, 0, 64, 500, 960] {
      let (cached, k) = cached_power(exp);
      let scaled = exp + cached.exp + 64;
      assert!((EXP_MIN..=EXP_MAX).contains(&scaled), "exp {exp}: {scaled}");
      assert_eq!((k - FIRST_POWER) % STEP_POWERS, 0);
    }
  }
}
