pub mod d100_stock_profitability;
