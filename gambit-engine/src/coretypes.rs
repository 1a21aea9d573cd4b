//! The fundamental and simple types of `gambit_engine`.

use std::convert::TryFrom;
use std::fmt::{self, Display, Write};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::ops::{BitOr, Not};
use std::str::FromStr;

use crate::error::{self, ErrorKind};

///////////////
// Constants //
///////////////
pub const NUM_FILES: usize = 8; // A, B, C, D, E, F, G, H
pub const NUM_RANKS: usize = 8; // 1, 2, 3, 4, 5, 6, 7, 8
pub const NUM_SQUARES: usize = NUM_FILES * NUM_RANKS;

// 6 Black, 6 White of Pawn, Knight, Bishop, Rook, Queen, King.
pub const NUM_PIECE_KINDS: usize = 12;

// The max possible measured number of moves for any chess position.
pub const MAX_MOVES: usize = 218;

// The deepest search the engine agrees to run. The search always completes
// at its requested depth, so this is the only bound on its latency.
pub const MAX_DEPTH: PlyKind = 8;

/////////////////////////
// Data and Structures //
/////////////////////////

/// Type alias for max ply/depth.
pub type PlyKind = u8;

/// Counter for half-move clock and full-moves.
pub type MoveCount = u16;

// Type alias to make changing Cp inner type easy if needed.
pub type CpKind = i32;

/// Centipawn, a common unit of measurement in chess, where 100 Centipawn == 1 Pawn.
/// Scores are absolute: positive is good for White, negative is good for Black.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Cp(pub CpKind);

/// Color can represent the color of a piece, or a player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Color {
    White,
    Black,
}

/// Enum variant order and discriminant are important.
/// Must be contiguous and start from 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Piece {
    pub(crate) color: Color,
    pub(crate) piece_kind: PieceKind,
}

/// Observe Castling rights for a position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Castling(u8);

/// Castling Enum constants.
impl Castling {
    pub const W_KING: Castling = Castling(0b00000001);
    pub const W_QUEEN: Castling = Castling(0b00000010);
    pub const B_KING: Castling = Castling(0b00000100);
    pub const B_QUEEN: Castling = Castling(0b00001000);
    pub const W_SIDE: Castling = Castling(Self::W_KING.0 | Self::W_QUEEN.0);
    pub const B_SIDE: Castling = Castling(Self::B_KING.0 | Self::B_QUEEN.0);
    pub const ALL: Castling = Castling(Self::W_SIDE.0 | Self::B_SIDE.0);
    pub const NONE: Castling = Castling(0u8);
    pub const ENUMERATIONS: usize = 16; // 16 possibilities for castling rights.
}

/// Enum variant order and discriminant must be contiguous, start from 0,
/// and be in ascending order ABCDEFGH.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[rustfmt::skip]
#[repr(u8)]
pub enum File {
    A, B, C, D, E, F, G, H = 7u8,
}

/// Enum variant order and discriminant must be contiguous, start from 0,
/// and be in ascending order 12345678.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[rustfmt::skip]
#[repr(u8)]
pub enum Rank {
    R1, R2, R3, R4, R5, R6, R7, R8 = 7u8,
}

/// Square
/// Every possible square on a chess board, in little-endian rank-file order.
/// `Square::A1 as u8` is 0, `Square::H8 as u8` is 63.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[rustfmt::skip]
#[repr(u8)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8 = 63u8,
}

/// Move
/// Long Algebraic form of moving a single chess piece.
/// Equivalent to a chess "half move", or "ply".
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    pub(crate) from: Square,
    pub(crate) to: Square,
    pub(crate) promotion: Option<PieceKind>,
}

/// Enum describing the kind of a move.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MoveKind {
    /// Move resulted in a capture.
    Capture(PieceKind),
    /// No special moves or captures, simply moved to empty square.
    Quiet,
    /// This move was the special castling move.
    Castle,
    /// En passant capture.
    EnPassant,
}

/// MoveInfo is the record of a move applied to a position.
/// It holds everything `Position::undo_move` needs to restore the prior position exactly.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MoveInfo {
    pub(crate) move_: Move,
    /// Kind of the piece that was moved, before any promotion.
    pub(crate) piece_kind: PieceKind,
    /// Flag if move was a regular or special move.
    pub(crate) move_kind: MoveKind,
    /// Castling rights before the move.
    pub(crate) castling: Castling,
    /// En passant target before the move.
    pub(crate) en_passant: Option<Square>,
    /// Half-move clock before the move.
    pub(crate) halfmoves: MoveCount,
}

////////////
// Traits //
////////////

/// SquareIndexable
/// A chessboard has 64 squares on it. SquareIndexable can be implemented
/// for types whose values can map directly to a chess Square's index.
pub trait SquareIndexable {
    /// idx(&self) must return a number between 0-63 inclusive, representing
    /// a square on a chess board in little-endian, rank-file order.
    fn idx(&self) -> usize;
}

// Blanket impl on references of types that are SquareIndexable.
impl<I: SquareIndexable> SquareIndexable for &I {
    fn idx(&self) -> usize {
        I::idx(*self)
    }
}

//////////////////////
/// Implementations //
//////////////////////

impl Cp {
    pub const MIN: Cp = Self(CpKind::MIN + 1); // + 1 to avoid overflow error on negate.
    pub const MAX: Cp = Self(CpKind::MAX);
    /// Score of a position where the side to move has been checkmated, from White's view.
    pub const CHECKMATE: Cp = Self(100_000);
    /// Score of any drawn terminal position.
    pub const DRAW: Cp = Self(0);

    /// Returns the sign of Centipawn value, either 1, -1, or 0.
    pub const fn signum(&self) -> CpKind {
        self.0.signum()
    }

    /// Returns true if this score is a checkmate score for either player.
    pub const fn is_mate(&self) -> bool {
        self.0 == Self::CHECKMATE.0 || self.0 == -Self::CHECKMATE.0
    }

    /// Returns the color this absolute score favors, or None if even.
    pub const fn leading(&self) -> Option<Color> {
        match self.signum() {
            1 => Some(Color::White),
            -1 => Some(Color::Black),
            _ => None,
        }
    }
}

impl Add for Cp {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl AddAssign for Cp {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}
impl Sub for Cp {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
impl SubAssign for Cp {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0
    }
}
impl Mul<CpKind> for Cp {
    type Output = Cp;
    fn mul(self, rhs: CpKind) -> Self::Output {
        Self(self.0 * rhs)
    }
}
impl Neg for Cp {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}
impl Display for Cp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// FEN compliant conversion.
    pub const fn to_char(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }

    /// Returns the absolute sign of a Color.
    /// A positive value is good for white and a negative value is good for Black.
    pub const fn sign(&self) -> CpKind {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank a player's pieces start on.
    pub const fn home_rank(&self) -> Rank {
        match self {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }

    /// Rank delta of a single pawn push for this player.
    pub const fn pawn_direction(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl From<Color> for char {
    fn from(color: Color) -> Self {
        color.to_char()
    }
}

impl TryFrom<char> for Color {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            'w' => Ok(Color::White),
            'b' => Ok(Color::Black),
            _ => Err((ErrorKind::ParseColorMalformed, "char is not w|b").into()),
        }
    }
}

/// Accepts `w`, `b`, `white` and `black`, in any case.
impl FromStr for Color {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Color::White),
            "b" | "black" => Ok(Color::Black),
            _ => Err((ErrorKind::ParseColorMalformed, s).into()),
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, in the order moves are generated.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// FEN compliant conversion, defaults as white pieces.
    pub const fn to_char(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Returns true if PieceKind can slide, false otherwise.
    /// Sliding piece_kinds are Rooks, Bishops, and Queens.
    pub const fn is_sliding(&self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen)
    }

    /// Parses a piece kind letter of either case.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl Piece {
    pub const fn new(color: Color, piece_kind: PieceKind) -> Self {
        Piece { color, piece_kind }
    }
    /// Immutable Getters.
    pub const fn color(&self) -> Color {
        self.color
    }
    pub const fn piece_kind(&self) -> PieceKind {
        self.piece_kind
    }

    /// Unique index of this piece in 0..NUM_PIECE_KINDS.
    pub const fn idx(&self) -> usize {
        self.color as usize * (NUM_PIECE_KINDS / 2) + self.piece_kind as usize
    }

    pub const fn to_char(&self) -> char {
        match self.color {
            Color::White => self.piece_kind.to_char(),
            Color::Black => self.piece_kind.to_char().to_ascii_lowercase(),
        }
    }
}

impl From<Piece> for char {
    fn from(piece: Piece) -> Self {
        piece.to_char()
    }
}

impl TryFrom<char> for Piece {
    type Error = error::Error;
    fn try_from(value: char) -> error::Result<Self> {
        let color = match value.is_ascii_uppercase() {
            true => Color::White,
            false => Color::Black,
        };
        let piece_kind = PieceKind::from_char(value)
            .ok_or((ErrorKind::ParsePieceMalformed, "char is not in PRNBQKprnbqk"))?;
        Ok(Piece { color, piece_kind })
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(char::from(*self))
    }
}

impl Castling {
    /// Make new Castling with all rights of initial chess position.
    pub const fn start_position() -> Self {
        Self::ALL
    }

    /// Returns underlying bits used to represent Castling rights.
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Returns true if there are no castling rights.
    pub const fn is_none(&self) -> bool {
        self.0 == 0u8
    }

    /// Returns true if Castling mask has all of provided bits.
    pub fn has(&self, rights: Castling) -> bool {
        self.0 & rights.0 == rights.0
    }

    /// Set given bits to '1' on Castling mask.
    pub fn set(&mut self, rights: Castling) {
        self.0 |= rights.0;
    }

    /// Set given bits to '0' on Castling mask.
    pub fn clear(&mut self, rights: Castling) {
        self.0 &= !rights.0;
    }

    /// Removes all castling rights for a color.
    pub fn clear_color(&mut self, color: Color) {
        match color {
            Color::White => self.clear(Self::W_SIDE),
            Color::Black => self.clear(Self::B_SIDE),
        }
    }

    /// Rights that are lost when a piece moves from or is captured on `square`.
    pub const fn lost_on(square: Square) -> Castling {
        match square {
            Square::E1 => Self::W_SIDE,
            Square::H1 => Self::W_KING,
            Square::A1 => Self::W_QUEEN,
            Square::E8 => Self::B_SIDE,
            Square::H8 => Self::B_KING,
            Square::A8 => Self::B_QUEEN,
            _ => Self::NONE,
        }
    }

    /// Returns the same rights with White and Black exchanged.
    pub const fn color_flip(&self) -> Castling {
        Castling(((self.0 & Self::W_SIDE.0) << 2) | ((self.0 & Self::B_SIDE.0) >> 2))
    }
}

/// Defaults to Castling rights for starting chess position, ALL.
impl Default for Castling {
    fn default() -> Self {
        Self::start_position()
    }
}

impl BitOr for Castling {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Displays in FEN-component format.
impl Display for Castling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_none() {
            return f.write_char('-');
        }
        for (rights, ch) in [
            (Self::W_KING, 'K'),
            (Self::W_QUEEN, 'Q'),
            (Self::B_KING, 'k'),
            (Self::B_QUEEN, 'q'),
        ] {
            if self.has(rights) {
                f.write_char(ch)?;
            }
        }
        Ok(())
    }
}

/// Castling ::= '-' | ['K'] ['Q'] ['k'] ['q']
impl FromStr for Castling {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        if s == "-" {
            return Ok(Castling::NONE);
        }
        if s.is_empty() || s.len() > 4 {
            return Err((ErrorKind::ParseCastlingMalformed, s).into());
        }

        let mut castling_rights = Castling::NONE;
        for ch in s.chars() {
            let rights = match ch {
                'K' => Self::W_KING,
                'Q' => Self::W_QUEEN,
                'k' => Self::B_KING,
                'q' => Self::B_QUEEN,
                _ => return Err((ErrorKind::ParseCastlingMalformed, "char not of -KQkq").into()),
            };
            castling_rights.set(rights);
        }
        Ok(castling_rights)
    }
}

impl File {
    pub const ALL: [File; NUM_FILES] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// File enum variants cover all u8 values from 0-7 inclusive.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0..=7 => Some(Self::ALL[value as usize]),
            _ => None,
        }
    }

    /// Get the character representation of File, in lowercase.
    pub const fn to_char(&self) -> char {
        (b'a' + *self as u8) as char
    }
}

impl Rank {
    pub const ALL: [Rank; NUM_RANKS] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Rank enum variants cover all u8 values from 0-7 inclusive.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0..=7 => Some(Self::ALL[value as usize]),
            _ => None,
        }
    }

    pub const fn to_char(&self) -> char {
        (b'1' + *self as u8) as char
    }

    /// Flips the orientation of the board.
    pub const fn flip(&self) -> Self {
        Self::ALL[7 - *self as usize]
    }
}

impl TryFrom<char> for File {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            'a'..='h' => Ok(Self::ALL[(ch as u8 - b'a') as usize]),
            _ => Err((ErrorKind::ParseFileMalformed, "file char not of abcdefgh").into()),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = error::Error;
    fn try_from(ch: char) -> error::Result<Self> {
        match ch {
            '1'..='8' => Ok(Self::ALL[(ch as u8 - b'1') as usize]),
            _ => Err((ErrorKind::ParseRankMalformed, "rank char not of 12345678").into()),
        }
    }
}

impl Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.to_char())
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.to_char())
    }
}

impl SquareIndexable for (File, Rank) {
    fn idx(&self) -> usize {
        let &(file, rank) = self;
        NUM_FILES * rank as usize + file as usize
    }
}

impl Square {
    #[rustfmt::skip]
    pub const ALL: [Square; NUM_SQUARES] = {
        use Square::*;
        [
            A1, B1, C1, D1, E1, F1, G1, H1,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A8, B8, C8, D8, E8, F8, G8, H8,
        ]
    };

    /// Square enum variants cover all u8 values from 0-63 inclusive.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0..=63 => Some(Self::ALL[value as usize]),
            _ => None,
        }
    }

    pub const fn from_file_rank(file: File, rank: Rank) -> Self {
        Self::ALL[rank as usize * NUM_FILES + file as usize]
    }

    pub const fn file(&self) -> File {
        File::ALL[self.file_u8() as usize]
    }

    pub const fn rank(&self) -> Rank {
        Rank::ALL[self.rank_u8() as usize]
    }

    /// Returns 0-based file (0,1,2,3,4,5,6,7), not 1-based chess file.
    pub const fn file_u8(&self) -> u8 {
        *self as u8 % NUM_FILES as u8
    }

    /// Returns 0-based rank (0,1,2,3,4,5,6,7), not 1-based chess rank.
    pub const fn rank_u8(&self) -> u8 {
        *self as u8 / NUM_FILES as u8
    }

    /// Returns the square `file_delta` files and `rank_delta` ranks away,
    /// or None if that walks off the board.
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file_u8() as i8 + file_delta;
        let rank = self.rank_u8() as i8 + rank_delta;
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            None
        } else {
            Some(Self::ALL[(rank * 8 + file) as usize])
        }
    }

    /// Flips the rank of the current square. For example, A1 -> A8, A2 -> A7.
    pub const fn flip_rank(&self) -> Self {
        Self::from_file_rank(self.file(), self.rank().flip())
    }

    /// Returns true for dark squares (A1 is dark).
    pub const fn is_dark(&self) -> bool {
        (self.file_u8() + self.rank_u8()) % 2 == 0
    }
}

impl From<(File, Rank)> for Square {
    fn from((file, rank): (File, Rank)) -> Self {
        Self::from_file_rank(file, rank)
    }
}

/// Square::= <fileLetter><rankNumber>
impl FromStr for Square {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let mut chars = s.chars();
        let file = File::try_from(chars.next().ok_or(ErrorKind::ParseSquareMalformed)?)?;
        let rank = Rank::try_from(chars.next().ok_or(ErrorKind::ParseSquareMalformed)?)?;
        if chars.next().is_some() {
            return Err((ErrorKind::ParseSquareMalformed, s).into());
        }
        Ok(Square::from((file, rank)))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl SquareIndexable for Square {
    fn idx(&self) -> usize {
        *self as usize
    }
}

impl Move {
    pub const fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    /// Immutable Getters.
    pub const fn from(&self) -> Square {
        self.from
    }
    pub const fn to(&self) -> Square {
        self.to
    }
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    /// Returns the same move on a board with ranks mirrored.
    pub const fn flip_rank(&self) -> Self {
        Self::new(self.from.flip_rank(), self.to.flip_rank(), self.promotion)
    }
}

impl MoveInfo {
    /// Get this MoveInfo's inner Move.
    pub const fn move_(&self) -> Move {
        self.move_
    }

    pub const fn piece_kind(&self) -> PieceKind {
        self.piece_kind
    }
    pub const fn move_kind(&self) -> MoveKind {
        self.move_kind
    }

    /// Returns true if the position before moving cannot be repeated in the game after the move.
    /// Captures and pawn moves are irreversible.
    pub fn is_unrepeatable(&self) -> bool {
        self.is_capture() || self.piece_kind == PieceKind::Pawn
    }

    /// Returns true if this MoveInfo came from a capturing move, en passant included.
    pub fn is_capture(&self) -> bool {
        matches!(self.move_kind, MoveKind::Capture(_) | MoveKind::EnPassant)
    }

    /// Returns the piece kind of the captured piece, if any.
    pub fn captured(&self) -> Option<PieceKind> {
        match self.move_kind {
            MoveKind::Capture(pk) => Some(pk),
            MoveKind::EnPassant => Some(PieceKind::Pawn),
            _ => None,
        }
    }
}

/// Parses `Pure Algebraic Coordinate Notation`, such as `e2e4` or `e7e8q`.
impl FromStr for Move {
    type Err = error::Error;
    fn from_str(s: &str) -> error::Result<Self> {
        let s = s.trim();
        if !(4..=5).contains(&s.len()) || !s.is_ascii() {
            return Err((ErrorKind::ParseMoveMalformed, s).into());
        }
        let from: Square = s[0..2].parse()?;
        let to: Square = s[2..4].parse()?;

        let promotion = match s.chars().nth(4) {
            None => None,
            Some(ch) => match PieceKind::from_char(ch) {
                Some(pk) if PieceKind::PROMOTIONS.contains(&pk) => Some(pk),
                _ => return Err((ErrorKind::ParseMoveMalformed, s).into()),
            },
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

/// # Example
/// Move { from: A7, to: B8, promotion: Some(Queen) } -> `a7b8q`.
impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece_kind) = self.promotion {
            f.write_char(piece_kind.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PieceKind::*;
    use Square::*;

    #[test]
    fn logical_not_color() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }

    #[test]
    fn castling_clear_and_flip() {
        let mut cr = Castling::default();
        assert!(cr.has(Castling::ALL));

        cr.clear(Castling::lost_on(H1));
        assert!(!cr.has(Castling::W_KING));
        assert!(cr.has(Castling::W_QUEEN));
        assert!(cr.has(Castling::B_SIDE));

        let flipped = cr.color_flip();
        assert!(flipped.has(Castling::W_SIDE));
        assert!(flipped.has(Castling::B_QUEEN));
        assert!(!flipped.has(Castling::B_KING));

        cr.clear_color(Color::Black);
        cr.clear(Castling::lost_on(E1));
        assert!(cr.is_none());
        assert_eq!(cr.to_string(), "-");
    }

    #[test]
    fn castling_to_from_string() {
        assert_eq!(Castling::from_str("-").unwrap(), Castling::NONE);
        assert_eq!(Castling::from_str("K").unwrap(), Castling::W_KING);
        assert_eq!(
            Castling::from_str("Kk").unwrap(),
            Castling::W_KING | Castling::B_KING
        );
        assert_eq!(Castling::from_str("KQkq").unwrap(), Castling::ALL);
        assert_eq!(Castling::ALL.to_string(), "KQkq");
        assert_eq!((Castling::W_QUEEN | Castling::B_KING).to_string(), "Qk");
        assert!(Castling::from_str("").is_err());
        assert!(Castling::from_str("x").is_err());
        assert!(Castling::from_str("KQkqK").is_err());
    }

    #[test]
    fn square_to_from_string() {
        for square in Square::ALL {
            let parsed: Square = square.to_string().parse().unwrap();
            assert_eq!(parsed, square);
        }
        assert_eq!(Square::from_str("b7").unwrap(), B7);
        assert!(Square::from_str("A1").is_err());
        assert!(Square::from_str("X3").is_err());
        assert!(Square::from_str("a$").is_err());
        assert!(Square::from_str("g").is_err());
        assert!(Square::from_str("a11").is_err());
    }

    #[test]
    fn square_geometry() {
        assert_eq!(E4.file(), File::E);
        assert_eq!(E4.rank(), Rank::R4);
        assert_eq!(Square::from((File::H, Rank::R8)), H8);
        assert_eq!(B4.offset(0, 1), Some(B5));
        assert_eq!(A1.offset(0, -1), None);
        assert_eq!(H4.offset(1, 0), None);
        assert_eq!(G1.offset(-1, 2), Some(F3));
        assert_eq!(A2.flip_rank(), A7);
        assert_eq!(H8.flip_rank(), H1);
        assert!(A1.is_dark());
        assert!(!H1.is_dark());
    }

    #[test]
    fn parse_move_from_str() {
        let move_: Move = "a1b2".parse().unwrap();
        assert_eq!(move_, Move::new(A1, B2, None));

        let move_: Move = "h7h8q".parse().unwrap();
        assert_eq!(move_, Move::new(H7, H8, Some(Queen)));
        assert_eq!(move_.to_string(), "h7h8q");

        assert!("h7h8k".parse::<Move>().is_err());
        assert!("e2".parse::<Move>().is_err());
        assert!("Nf3".parse::<Move>().is_err());
    }

    #[test]
    fn piece_indices_are_unique() {
        let mut seen = [false; NUM_PIECE_KINDS];
        for color in Color::ALL {
            for piece_kind in PieceKind::ALL {
                let idx = Piece::new(color, piece_kind).idx();
                assert!(!seen[idx]);
                seen[idx] = true;
            }
        }
    }

    #[test]
    fn cp_mate_and_leading() {
        assert!(Cp::CHECKMATE.is_mate());
        assert!((-Cp::CHECKMATE).is_mate());
        assert!(!Cp(99_999).is_mate());
        assert_eq!(Cp(5).leading(), Some(Color::White));
        assert_eq!(Cp(-5).leading(), Some(Color::Black));
        assert_eq!(Cp::DRAW.leading(), None);
        assert_eq!((-Cp::MIN).signum(), 1);
    }
}
