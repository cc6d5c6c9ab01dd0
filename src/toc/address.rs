use crate::md::{GROUPS_PER_CLUSTER, GROUPS_PER_SECTOR, MAX_CLUSTER, SECTORS_PER_CLUSTER};
use std::fmt;

/// Physical position on disc, addressed down to a single sound group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DiscAddress {
    pub cluster: u16,
    pub sector: u8,
    pub group: u8,
}

impl DiscAddress {
    pub fn new(cluster: u16, sector: u8, group: u8) -> Self {
        Self {
            cluster,
            sector,
            group,
        }
    }

    /// Linear group index, increasing along playback order.
    pub fn to_group_index(&self) -> u32 {
        (self.cluster as u32 * SECTORS_PER_CLUSTER + self.sector as u32) * GROUPS_PER_SECTOR
            + self.group as u32
    }

    /// Inverse of [`DiscAddress::to_group_index`]. `None` past the last addressable cluster.
    pub fn from_group_index(index: u32) -> Option<Self> {
        let cluster = u16::try_from(index / GROUPS_PER_CLUSTER)
            .ok()
            .filter(|&cluster| cluster <= MAX_CLUSTER)?;
        let rem = index % GROUPS_PER_CLUSTER;

        Some(Self {
            cluster,
            sector: (rem / GROUPS_PER_SECTOR) as u8,
            group: (rem % GROUPS_PER_SECTOR) as u8,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.cluster == 0 && self.sector == 0 && self.group == 0
    }

    /// 14-bit cluster, 6-bit sector, 4-bit group.
    pub fn from_packed(bytes: [u8; 3]) -> Self {
        Self {
            cluster: ((bytes[0] as u16) << 6) | (bytes[1] >> 2) as u16,
            sector: ((bytes[1] & 0x03) << 4) | (bytes[2] >> 4),
            group: bytes[2] & 0x0f,
        }
    }

    pub fn to_packed(&self) -> [u8; 3] {
        [
            (self.cluster >> 6) as u8,
            (((self.cluster & 0x3f) as u8) << 2) | (self.sector >> 4),
            ((self.sector & 0x0f) << 4) | (self.group & 0x0f),
        ]
    }
}

impl fmt::Display for DiscAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}:{:02}:{:02}", self.cluster, self.sector, self.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_index_round_trip() {
        for cluster in [0u16, 1, 2, 100, 2000, 0x3fff] {
            for sector in 0..32u8 {
                for group in 0..11u8 {
                    let addr = DiscAddress::new(cluster, sector, group);
                    assert_eq!(DiscAddress::from_group_index(addr.to_group_index()).unwrap(), addr);
                }
            }
        }
    }

    #[test]
    fn test_group_index_values() {
        assert_eq!(DiscAddress::new(0, 0, 0).to_group_index(), 0);
        assert_eq!(DiscAddress::new(0, 0, 10).to_group_index(), 10);
        assert_eq!(DiscAddress::new(0, 1, 0).to_group_index(), 11);
        assert_eq!(DiscAddress::new(1, 0, 0).to_group_index(), 352);
        assert_eq!(DiscAddress::new(2, 27, 0).to_group_index(), 1001);
        assert_eq!(DiscAddress::from_group_index(1000).unwrap(), DiscAddress::new(2, 26, 10));
    }

    #[test]
    fn test_group_index_is_monotonic() {
        for index in 0..5000 {
            let a = DiscAddress::from_group_index(index).unwrap();
            let b = DiscAddress::from_group_index(index + 1).unwrap();
            assert!((a.cluster, a.sector, a.group) < (b.cluster, b.sector, b.group));
        }
    }

    #[test]
    fn test_group_index_past_last_cluster() {
        let last = DiscAddress::new(MAX_CLUSTER, 31, 10);
        assert_eq!(
            DiscAddress::from_group_index(last.to_group_index()),
            Some(last)
        );
        assert_eq!(DiscAddress::from_group_index(last.to_group_index() + 1), None);
        assert_eq!(DiscAddress::from_group_index(u32::MAX), None);
    }

    #[test]
    fn test_packed_layout() {
        let addr = DiscAddress::new(0x0123, 0x1f, 0x0a);
        let packed = addr.to_packed();
        assert_eq!(packed, [0x04, 0x8d, 0xfa]);
        assert_eq!(DiscAddress::from_packed(packed), addr);

        let max = DiscAddress::new(0x3fff, 0x3f, 0x0f);
        assert_eq!(max.to_packed(), [0xff, 0xff, 0xff]);
    }

    #[test]
    fn test_display() {
        assert_eq!(DiscAddress::new(3, 2, 1).to_string(), "0003:02:01");
    }
}
