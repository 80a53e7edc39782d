use once_cell::sync::Lazy;
use std::collections::HashMap;

use doctordork_core::{Error, Result};

/// A state or territory medical licensing authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jurisdiction {
    pub code: &'static str,
    pub name: &'static str,
    pub url: &'static str,
}

const fn board(code: &'static str, name: &'static str, url: &'static str) -> Jurisdiction {
    Jurisdiction { code, name, url }
}

const MEDICAL_BOARDS: &[Jurisdiction] = &[
    board("AL", "Alabama", "https://www.albme.org/Licensing/Verification.aspx"),
    board("AK", "Alaska", "https://www.commerce.alaska.gov/cbp/main/Search/Professional"),
    board("AZ", "Arizona", "https://azmd.gov/"),
    board("AR", "Arkansas", "https://www.armedicalboard.org/Public/verify/default.aspx"),
    board("CA", "California", "https://www.mbc.ca.gov/Lookup.aspx"),
    board("CO", "Colorado", "https://apps.colorado.gov/dora/licensing/Lookup/LicenseLookup.aspx"),
    board("CT", "Connecticut", "https://www.elicense.ct.gov/Lookup/LicenseLookup.aspx"),
    board("DE", "Delaware", "https://dpr.delaware.gov/boards/medicalpractice/"),
    board("DC", "District of Columbia", "https://doh.dc.gov/bomed"),
    board("FL", "Florida", "https://mqa-internet.doh.state.fl.us/MQASearchServices/Home"),
    board("GA", "Georgia", "https://gcmb.mylicense.com/verification/"),
    board("HI", "Hawaii", "https://mypvl.dcca.hawaii.gov/public-license-search/"),
    board("ID", "Idaho", "https://bom.idaho.gov/BOMPortal/"),
    board("IL", "Illinois", "https://www.idfpr.com/LicenseLookup/"),
    board("IN", "Indiana", "https://mylicense.in.gov/everification/Search.aspx"),
    board("IA", "Iowa", "https://eservices.iowa.gov/licensediniowa/"),
    board("KS", "Kansas", "https://www.ksbha.org/"),
    board("KY", "Kentucky", "https://web1.ky.gov/GenSearch/LicenseList.aspx?AGY=5"),
    board("LA", "Louisiana", "https://www.lsbme.la.gov/"),
    board("ME", "Maine", "https://www.maine.gov/md/"),
    board("MD", "Maryland", "https://www.mbp.state.md.us/bpqapp/"),
    board("MA", "Massachusetts", "https://www.mass.gov/orgs/board-of-registration-in-medicine"),
    board("MI", "Michigan", "https://www.michigan.gov/lara/bureau-list/bpl/occ/prof/medicine"),
    board("MN", "Minnesota", "https://mn.gov/boards/medical-practice/"),
    board("MS", "Mississippi", "https://www.msbml.ms.gov/"),
    board("MO", "Missouri", "https://pr.mo.gov/licensee-search.asp"),
    board("MT", "Montana", "https://boards.bsd.dli.mt.gov/med"),
    board("NE", "Nebraska", "https://www.nebraska.gov/LISSearch/search.cgi"),
    board("NV", "Nevada", "https://medboard.nv.gov/"),
    board("NH", "New Hampshire", "https://www.nh.gov/oplc/"),
    board("NJ", "New Jersey", "https://newjersey.mylicense.com/verification/"),
    board("NM", "New Mexico", "https://www.nmmb.state.nm.us/"),
    board("NY", "New York", "https://www.op.nysed.gov/verification-search"),
    board("NC", "North Carolina", "https://www.ncmedboard.org/"),
    board("ND", "North Dakota", "https://www.ndbomex.com/"),
    board("OH", "Ohio", "https://elicense.ohio.gov/"),
    board("OK", "Oklahoma", "https://www.okmedicalboard.org/"),
    board("OR", "Oregon", "https://omb.oregon.gov/"),
    board("PA", "Pennsylvania", "https://www.pals.pa.gov/#/page/search"),
    board("RI", "Rhode Island", "https://health.ri.gov/licenses/detail.php?id=231"),
    board("SC", "South Carolina", "https://verify.llronline.com/"),
    board("SD", "South Dakota", "https://boardsandcommissions.sd.gov/"),
    board("TN", "Tennessee", "https://apps.health.tn.gov/Licensure/"),
    board("TX", "Texas", "https://profile.tmb.state.tx.us/"),
    board("UT", "Utah", "https://dopl.utah.gov/"),
    board("VT", "Vermont", "https://sos.vermont.gov/opr/"),
    board("VA", "Virginia", "https://www.dhp.virginia.gov/"),
    board("WA", "Washington", "https://fortress.wa.gov/doh/providercredentialsearch/"),
    board("WV", "West Virginia", "https://wvbom.wv.gov/"),
    board("WI", "Wisconsin", "https://dsps.wi.gov/"),
    board("WY", "Wyoming", "https://wyomedboard.state.wy.us/"),];

static BY_CODE: Lazy<HashMap<&'static str, &'static Jurisdiction>> =
    Lazy::new(|| MEDICAL_BOARDS.iter().map(|j| (j.code, j)).collect());

/// Number of licensing authorities covered (50 states and DC).
pub fn count() -> usize {
    MEDICAL_BOARDS.len()
}

/// Looks up a board by its 2-letter code, ignoring case and surrounding
/// whitespace.
pub fn lookup(code: &str) -> Result<&'static Jurisdiction> {
    let code = code.trim().to_uppercase();
    BY_CODE
        .get(code.as_str())
        .copied()
        .ok_or_else(|| Error::NotFound(format!("Invalid state code: {}", code)))
}

pub fn is_known(code: &str) -> bool {
    lookup(code).is_ok()
}

/// All boards sorted by code.
pub fn all() -> Vec<&'static Jurisdiction> {
    let mut boards: Vec<&'static Jurisdiction> = MEDICAL_BOARDS.iter().collect();
    boards.sort_by_key(|j| j.code);
    boards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_fifty_states_and_dc() {
        assert_eq!(count(), 51);
        assert_eq!(BY_CODE.len(), 51);
        assert!(is_known("DC"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let board = lookup(" ma ").unwrap();
        assert_eq!(board.name, "Massachusetts");
        assert!(board.url.starts_with("https://"));
    }

    #[test]
    fn test_unknown_code_is_an_error() {
        match lookup("ZZ") {
            Err(Error::NotFound(msg)) => assert!(msg.contains("ZZ")),
            other => panic!("Expected NotFound, got {:?}", other),
        }
        assert!(lookup("").is_err());
        assert!(!is_known("PR"));
    }

    #[test]
    fn test_all_sorted_by_code() {
        let codes: Vec<&str> = all().iter().map(|j| j.code).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
        assert_eq!(codes.first(), Some(&"AK"));
        assert_eq!(codes.last(), Some(&"WY"));
    }
}
