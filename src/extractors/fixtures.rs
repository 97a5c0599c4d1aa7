// src/extractors/fixtures.rs
//! Export documents shared by the extractor tests.

/// One catalog line with body, panels and a root-level price.
pub const LINE_A_FULL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<LISTING>
  <TOTALPRICES TABLE="12500.75" BUDGET="31250.00"/>
  <AMBIENTS>
    <AMBIENT DESCRIPTION="Project - Kitchen">
      <CATEGORIES>
        <CATEGORY DESCRIPTION="LINE_A">
          <PROPERTY NAME="Panel"><VALUE>Side panel MDF 18mm</VALUE></PROPERTY>
          <PROPERTY NAME="Panel Finish"><VALUE>MDF\Graphite</VALUE></PROPERTY>
        </CATEGORY>
        <CATEGORY DESCRIPTION="LINE_A_BODY">
          <PROPERTY NAME="Collection"><VALUE>Essenza</VALUE></PROPERTY>
          <PROPERTY NAME="Body Thickness"><VALUE>15mm</VALUE></PROPERTY>
          <PROPERTY NAME="Shelf Thickness"><VALUE>Shelf 18 mm</VALUE></PROPERTY>
          <PROPERTY NAME="Body Finish">
            <VALUE>MDP\White</VALUE>
            <VALUE>Oak</VALUE>
            <VALUE>MDP\White</VALUE>
          </PROPERTY>
        </CATEGORY>
      </CATEGORIES>
    </AMBIENT>
  </AMBIENTS>
</LISTING>"#;

/// Both catalog lines plus door-profile and special-finish groupings.
/// Prices come from the environment total and category subtotals.
pub const BOTH_LINES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<LISTING>
  <AMBIENTS>
    <AMBIENT DESCRIPTION="Projeto - Living Room">
      <TOTALPRICES TABLE="8.000,50"/>
      <CATEGORIES>
        <CATEGORY DESCRIPTION="LINE_A">
          <TOTALPRICES TABLE="5000" BUDGET="10000"/>
          <PROPERTY NAME="Door Model"><VALUE>Shaker</VALUE><VALUE>Flat</VALUE></PROPERTY>
          <PROPERTY NAME="Door Finish"><VALUE>MDF\White</VALUE></PROPERTY>
          <PROPERTY NAME="Door Thickness"><VALUE>18mm</VALUE></PROPERTY>
          <PROPERTY NAME="Handle Model"><VALUE>Bar 160mm</VALUE></PROPERTY>
          <PROPERTY NAME="Hinge"><VALUE>Clip Top with damper</VALUE></PROPERTY>
          <PROPERTY NAME="Slide Brand"><VALUE>Blum</VALUE></PROPERTY>
          <PROPERTY NAME="Drawer Model"><VALUE>Drawer with slide Tandembox/Antaro</VALUE></PROPERTY>
          <PROPERTY NAME="Slide Type"><VALUE>With damping</VALUE></PROPERTY>
        </CATEGORY>
        <CATEGORY DESCRIPTION="LINE_B">
          <TOTALPRICES TABLE="3000,50" BUDGET="5.500,25"/>
          <PROPERTY NAME="Front Model"><VALUE>Flat</VALUE><VALUE>Slatted</VALUE></PROPERTY>
          <PROPERTY NAME="Front Material"><VALUE>Lacquered MDF</VALUE></PROPERTY>
          <PROPERTY NAME="Front Color"><VALUE>Sand</VALUE></PROPERTY>
          <PROPERTY NAME="Front Thickness"><VALUE>Front 22 mm</VALUE></PROPERTY>
          <PROPERTY NAME="Pull"><VALUE>Recessed &amp;gt; Gola &amp;gt; Gola</VALUE></PROPERTY>
          <PROPERTY NAME="Handle"><VALUE>Knob</VALUE></PROPERTY>
          <PROPERTY NAME="Hinges"><VALUE>Clip Top without damper</VALUE></PROPERTY>
          <PROPERTY NAME="Runner Brand"><VALUE>Hettich</VALUE></PROPERTY>
          <PROPERTY NAME="Damping"><VALUE>without damping</VALUE></PROPERTY>
        </CATEGORY>
        <CATEGORY DESCRIPTION="PROFILE_DOOR">
          <PROPERTY NAME="Profile"><VALUE>Aluminium &amp;gt; Slim &amp;gt; Slim</VALUE></PROPERTY>
          <PROPERTY NAME="Glass"><VALUE>Glass 4mm tempered</VALUE></PROPERTY>
          <PROPERTY NAME="Profile Handle"><VALUE>with Profile Pull</VALUE></PROPERTY>
        </CATEGORY>
        <CATEGORY DESCRIPTION="SPECIAL_FINISH">
          <PROPERTY NAME="Finish"><VALUE>Lacquer 1mm\Petrol Blue</VALUE></PROPERTY>
          <PROPERTY NAME="Finish Color"><VALUE>Matte Black</VALUE></PROPERTY>
        </CATEGORY>
      </CATEGORIES>
    </AMBIENT>
  </AMBIENTS>
</LISTING>"#;

/// Door-profile data but no catalog line marker.
pub const PROFILE_ONLY: &str = r#"<LISTING>
  <AMBIENTS>
    <AMBIENT DESCRIPTION="Project - Laundry">
      <CATEGORIES>
        <CATEGORY DESCRIPTION="PROFILE_DOOR">
          <PROPERTY NAME="Profile"><VALUE>Aluminium</VALUE></PROPERTY>
          <PROPERTY NAME="Glass"><VALUE>Glass 4mm tempered</VALUE></PROPERTY>
        </CATEGORY>
      </CATEGORIES>
    </AMBIENT>
  </AMBIENTS>
</LISTING>"#;

/// LineB panels with a subtotal that is not a number and no other price.
pub const BAD_SUBTOTAL: &str = r#"<LISTING>
  <AMBIENTS>
    <AMBIENT DESCRIPTION="Bathroom">
      <CATEGORIES>
        <CATEGORY DESCRIPTION="LINE_B">
          <TOTALPRICES TABLE="n/a" BUDGET="n/a"/>
          <PROPERTY NAME="Panel Material"><VALUE>MDP</VALUE></PROPERTY>
          <PROPERTY NAME="Panel Color"><VALUE>Cement</VALUE></PROPERTY>
        </CATEGORY>
      </CATEGORIES>
    </AMBIENT>
  </AMBIENTS>
</LISTING>"#;
